//! Describe command: population properties of the configured process.

use anyhow::{Context, Result};
use tracing::{info, info_span};

use tsvar_var::VarProcess;

use crate::cli::DescribeArgs;
use crate::config::{self, TsvarConfig};
use crate::convert;
use crate::output;
use crate::report::ProcessReport;

/// Report stability, mean, autocovariances and MA matrices without simulating.
pub fn run(args: DescribeArgs) -> Result<()> {
    let _cmd = info_span!("describe").entered();

    let config = config::load(&args.config)?;
    let report = build_report(&config)?;

    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    let output = args.output.or(config.output);
    output::emit(output.as_deref(), &json)
}

/// Same horizon as the `process` section of `tsvar run`.
pub fn build_report(config: &TsvarConfig) -> Result<ProcessReport> {
    let process = convert::build_process(&config.process)?;
    info!(
        p = process.lag_order(),
        k = process.neqs(),
        stable = process.is_stable(),
        "process loaded"
    );

    let analysis = &config.analysis;
    let report = ProcessReport::new(&process, analysis.acf_lags, analysis.forecast_steps);
    if report.mean.is_none() {
        info!("process has a unit root; mean and autocovariances are undefined");
    }
    Ok(report)
}
