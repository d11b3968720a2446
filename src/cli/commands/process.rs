//! Download and convert command.

use std::path::PathBuf;
use tokio::runtime::Runtime;

use crate::config::Config;
use crate::pipeline::{ConsoleReporter, Orchestrator, ProcessRequest, TargetFormat};
use crate::search::ItunesClient;
use crate::tools::SystemTool;

/// Raw `process` flags before config defaults are applied
#[derive(Debug, Clone)]
pub struct ProcessArgs {
    pub list_file: Option<PathBuf>,
    pub output_dir: PathBuf,
    pub format: TargetFormat,
    pub cleanup: bool,
    pub convert_only: bool,
    pub download_workers: Option<usize>,
    pub convert_workers: Option<usize>,
}

/// Fill unset worker counts from config.
pub fn build_request(config: &Config, args: ProcessArgs) -> ProcessRequest {
    ProcessRequest {
        list_file: args.list_file,
        output_dir: args.output_dir,
        format: args.format,
        cleanup: args.cleanup,
        convert_only: args.convert_only,
        download_workers: args.download_workers.unwrap_or(config.download.workers),
        convert_workers: args
            .convert_workers
            .unwrap_or_else(|| config.convert.effective_workers()),
    }
}

/// Find, download and convert music in parallel
pub fn cmd_process(config: &Config, request: &ProcessRequest) -> anyhow::Result<()> {
    let search = ItunesClient::new(config.download.search_url.clone(), config.download.timeout())?;
    let orchestrator = Orchestrator::new(
        Box::new(search),
        Box::new(SystemTool::new(config.download.downloader.clone())),
        Box::new(SystemTool::new(config.convert.encoder.clone())),
    );

    tracing::info!(
        target: "process",
        output = %request.output_dir.display(),
        format = request.format.label(),
        download_workers = request.download_workers,
        convert_workers = request.convert_workers,
        "Starting"
    );

    let rt = Runtime::new()?;
    let mut reporter = ConsoleReporter::default();
    rt.block_on(orchestrator.run(request, &mut reporter))?;
    Ok(())
}
