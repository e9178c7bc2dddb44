//! Run command: simulate the configured process, estimate, analyse and report.

use anyhow::{Context, Result, bail};
use ndarray::s;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{info, info_span, warn};

use tsvar_var::{KnownProcess, TimeSeries, VarModel, VarProcess, VarResults, VariableRef};

use crate::cli::RunArgs;
use crate::config::{self, TsvarConfig};
use crate::convert::{self, FitPlan};
use crate::output;
use crate::report::{
    CausalityReport, EstimateReport, FevdReport, ForecastReport, IrfReport, ProcessReport,
    RunReport, SampleReport, SelectionReport,
};

/// Run the simulate-estimate-report pipeline.
pub fn run(args: RunArgs) -> Result<()> {
    let _cmd = info_span!("run").entered();

    // 1. Load project TOML and apply CLI overrides
    let config = config::load(&args.config)?;
    let seed = args.seed.or(config.simulate.seed);
    let output = args.output.or_else(|| config.output.clone());

    let report = build_report(&config, seed)?;
    let json = serde_json::to_string_pretty(&report).context("failed to serialise report")?;
    output::emit(output.as_deref(), &json)
}

/// Everything after config loading; separated so it can be driven from tests.
pub fn build_report(config: &TsvarConfig, seed: Option<u64>) -> Result<RunReport> {
    // 2. Build the known process
    let process = convert::build_process(&config.process)?;
    let plan = convert::build_fit_plan(&config.fit)?;
    let causality = config
        .causality
        .iter()
        .map(convert::build_causality_request)
        .collect::<Result<Vec<_>>>()?;
    if !process.is_stable() {
        warn!("configured process is not stable; simulated data will explode");
    }

    // 3. Simulate
    let series = simulate_sample(&process, config, seed)?;
    let summary = series.describe();
    info!(nobs = series.nobs(), neqs = series.neqs(), "sample simulated");

    // 4. Estimate
    let model = VarModel::new(series);
    let (selection, fit) = match plan {
        FitPlan::Fixed(p) => (
            None,
            model.fit(p).with_context(|| format!("failed to fit VAR({p})"))?,
        ),
        FitPlan::Select { maxlags, criterion } => {
            let sel = model
                .select_order(maxlags)
                .context("lag-order selection failed")?;
            let p = sel.selected(criterion);
            info!(p, %criterion, "lag order selected");
            let fit = model
                .fit(p)
                .with_context(|| format!("failed to fit VAR({p})"))?;
            (Some(SelectionReport::new(&sel, criterion)), fit)
        }
    };
    info!(
        p = fit.lag_order(),
        sample_size = fit.sample_size(),
        stable = fit.is_stable(),
        "model estimated"
    );

    // 5. Analyse
    let analysis = &config.analysis;
    let interval = fit
        .forecast_interval_from_sample(analysis.forecast_steps, analysis.alpha)
        .context("forecast failed")?;
    let irf = fit
        .irf(analysis.irf_periods, None)
        .context("impulse-response analysis failed")?;
    let fevd = fit
        .fevd(analysis.irf_periods, None)
        .context("variance decomposition failed")?;

    let causality = causality
        .iter()
        .map(|req| -> Result<CausalityReport> {
            let test = fit
                .test_causality(&req.equation, &req.variables, req.kind, req.signif)
                .with_context(|| format!("causality test on {} failed", req.equation))?;
            info!(
                equation = %req.equation,
                stat = test.test_stat,
                pvalue = test.pvalue,
                conclusion = %test.conclusion,
                "causality test"
            );
            Ok(CausalityReport::new(
                variable_name(&fit, &req.equation)?,
                req.variables
                    .iter()
                    .map(|v| variable_name(&fit, v))
                    .collect::<Result<_>>()?,
                &test,
            ))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(RunReport {
        process: ProcessReport::new(&process, analysis.acf_lags, analysis.forecast_steps),
        sample: SampleReport {
            nobs: config.simulate.nobs,
            burn_in: config.simulate.burn_in,
            seed,
            summary: summary.into_iter().map(Into::into).collect(),
        },
        selection,
        estimate: EstimateReport::new(&fit).context("failed to summarise estimates")?,
        forecast: ForecastReport::new(&interval, analysis.alpha),
        irf: IrfReport::from(&irf),
        fevd: FevdReport::from(&fevd),
        causality,
    })
}

/// Draws `burn_in + nobs` rows and keeps the last `nobs`.
fn simulate_sample(
    process: &KnownProcess,
    config: &TsvarConfig,
    seed: Option<u64>,
) -> Result<TimeSeries> {
    let sim = &config.simulate;
    if sim.nobs == 0 {
        bail!("simulate.nobs must be positive");
    }

    let mut rng = match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    };
    let raw = process
        .simulate(sim.burn_in + sim.nobs, &mut rng)
        .context("simulation failed")?;

    TimeSeries::new(raw.slice(s![sim.burn_in.., ..]).to_owned())
        .and_then(|ts| ts.with_names(process.names().iter().cloned()))
        .context("simulated sample is unusable")
}

fn variable_name(fit: &VarResults, var: &VariableRef) -> Result<String> {
    let idx = fit.eq_index(var)?;
    Ok(fit.names()[idx].clone())
}
