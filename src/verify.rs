//! Verify command: FB and AROC with bootstrapped confidence intervals.

use std::path::Path;

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use serde::Serialize;
use tracing::{info, info_span, warn};

use tlaloc_bootstrap::{
    BootstrapConfig, BootstrapDistribution, bootstrap_aroc, bootstrap_frequency_bias,
};
use tlaloc_skill::BiasDenominator;
use tlaloc_store::{CaseKey, TableStore};

use crate::cli::VerifyArgs;
use crate::config::TlalocConfig;

/// One verification tuple: everything fixed except the lead step.
struct CaseTuple {
    system: String,
    members: usize,
    region: String,
    effci: u8,
    magnitude: u8,
}

/// Run the verification pipeline.
pub fn run(args: VerifyArgs) -> Result<()> {
    let _cmd = info_span!("verify").entered();

    // 1. Load and validate project TOML
    let toml_str = std::fs::read_to_string(&args.config)
        .with_context(|| format!("failed to read config file: {}", args.config.display()))?;
    let config: TlalocConfig = toml::from_str(&toml_str).context("failed to parse TOML config")?;
    config.validate().context("invalid configuration")?;

    let seed = args.seed.or(config.seed).unwrap_or(0);
    let output_dir = args.output.unwrap_or_else(|| config.io.output_dir.clone());
    std::fs::create_dir_all(&output_dir)
        .with_context(|| format!("failed to create output dir: {}", output_dir.display()))?;

    let bias_policy = match config.bootstrap.bias_fallback.as_str() {
        "ensemble-size" => BiasDenominator::EnsembleSize,
        _ => BiasDenominator::Undefined,
    };
    let bootstrap_cfg = BootstrapConfig::new()
        .with_repetitions(config.bootstrap.repetitions)
        .with_seed(seed);
    let level = config.bootstrap.confidence_level;

    let store = TableStore::new(&config.io.tables_dir);
    let days = config.days();
    let steps = config.lead_steps();

    // 2. Explicit task list: system x EFFCI x magnitude x region
    let effcis = &config.events.effci;
    let magnitudes = &config.events.magnitudes;
    let regions = &config.regions;
    let tasks: Vec<CaseTuple> = config
        .systems
        .iter()
        .flat_map(|sys| {
            effcis.iter().flat_map(move |&effci| {
                magnitudes.iter().flat_map(move |&magnitude| {
                    regions.iter().map(move |region| CaseTuple {
                        system: sys.name.clone(),
                        members: sys.members,
                        region: region.clone(),
                        effci,
                        magnitude,
                    })
                })
            })
        })
        .collect();

    info!(
        n_tuples = tasks.len(),
        n_steps = steps.len(),
        n_days = days.len(),
        repetitions = config.bootstrap.repetitions,
        seed,
        "starting verification"
    );

    // 3. Run every tuple; failures are isolated and summarised
    let mut completed = 0usize;
    let mut failed = 0usize;
    for tuple in &tasks {
        let _t = info_span!(
            "tuple",
            system = %tuple.system,
            region = %tuple.region,
            effci = tuple.effci,
            vre = tuple.magnitude
        )
        .entered();

        match run_tuple(
            tuple,
            &config,
            &store,
            &days,
            &steps,
            &bootstrap_cfg,
            bias_policy,
            level,
            seed,
            args.full_distributions,
            &output_dir,
        ) {
            Ok(()) => completed += 1,
            Err(e) => {
                warn!(error = %format!("{e:#}"), "tuple failed, continuing");
                failed += 1;
            }
        }
    }

    info!(completed, failed, "verification finished");
    if completed == 0 {
        bail!("all {failed} verification tuples failed");
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_tuple(
    tuple: &CaseTuple,
    config: &TlalocConfig,
    store: &TableStore,
    days: &[NaiveDate],
    steps: &[u32],
    bootstrap_cfg: &BootstrapConfig,
    bias_policy: BiasDenominator,
    level: f64,
    seed: u64,
    full_distributions: bool,
    output_dir: &Path,
) -> Result<()> {
    let mut step_outputs = Vec::with_capacity(steps.len());
    let mut failed_steps = 0usize;

    // A lead step with no usable data fails alone; the other steps of the
    // tuple still produce output.
    for &step in steps {
        match run_step(
            tuple,
            config,
            store,
            days,
            step,
            bootstrap_cfg,
            bias_policy,
            level,
            full_distributions,
        ) {
            Ok(out) => step_outputs.push(out),
            Err(e) => {
                warn!(step, error = %format!("{e:#}"), "lead step failed, continuing");
                failed_steps += 1;
            }
        }
    }

    if step_outputs.is_empty() {
        bail!("all {failed_steps} lead steps failed");
    }

    let output = TupleOutput {
        system: tuple.system.clone(),
        region: tuple.region.clone(),
        effci: tuple.effci,
        magnitude: tuple.magnitude,
        accumulation_hours: config.events.accumulation_hours,
        period_start: config.period.start,
        period_end: config.period.end,
        repetitions: config.bootstrap.repetitions,
        seed,
        confidence_level: level,
        steps: step_outputs,
    };

    let file_name = format!(
        "fb_aroc_{:02}h_vre{:02}_{}_effci{:02}_{}.json",
        config.events.accumulation_hours,
        tuple.magnitude,
        tuple.system,
        tuple.effci,
        tuple.region
    );
    let path = output_dir.join(file_name);
    let json = serde_json::to_string_pretty(&output).context("failed to serialize output")?;
    std::fs::write(&path, json)
        .with_context(|| format!("failed to write output: {}", path.display()))?;
    info!(path = %path.display(), "tuple output written");
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_step(
    tuple: &CaseTuple,
    config: &TlalocConfig,
    store: &TableStore,
    days: &[NaiveDate],
    step: u32,
    bootstrap_cfg: &BootstrapConfig,
    bias_policy: BiasDenominator,
    level: f64,
    full_distributions: bool,
) -> Result<StepOutput> {
    let key = CaseKey::new(
        &tuple.system,
        &tuple.region,
        tuple.effci,
        tuple.magnitude,
        config.events.accumulation_hours,
        step,
    );

    let day_set = store
        .load_period(&key, days)
        .with_context(|| format!("failed to load daily tables for {key}"))?;
    info!(
        step,
        present = day_set.n_present(),
        total = day_set.len(),
        "daily tables loaded"
    );

    // Cross-check the stored ensemble size against the config.
    if let Some(table) = day_set.tables().iter().flatten().next()
        && table.num_members() != tuple.members
    {
        bail!(
            "{key}: stored tables have {} members, config says {}",
            table.num_members(),
            tuple.members
        );
    }

    let aroc = bootstrap_aroc(day_set.tables(), bootstrap_cfg)
        .with_context(|| format!("AROC bootstrap failed for {key}"))?;
    let fb = bootstrap_frequency_bias(day_set.tables(), bias_policy, bootstrap_cfg)
        .with_context(|| format!("FB bootstrap failed for {key}"))?;

    let ci = aroc.confidence_interval(level);
    info!(
        step,
        aroc = format!("{:.2}", aroc.real()),
        ci_lower = format!("{:.2}", ci.lower),
        ci_upper = format!("{:.2}", ci.upper),
        "step verified"
    );

    Ok(build_step_output(
        step,
        &day_set,
        &aroc,
        &fb,
        level,
        full_distributions,
    ))
}

fn build_step_output(
    step: u32,
    day_set: &tlaloc_store::DaySet,
    aroc: &BootstrapDistribution<f64>,
    fb: &BootstrapDistribution<Vec<f64>>,
    level: f64,
    full_distributions: bool,
) -> StepOutput {
    let fb_cis = fb.confidence_intervals(level);
    let frequency_bias = fb
        .real()
        .iter()
        .zip(fb_cis)
        .enumerate()
        .map(|(k, (&real, ci))| RuleScore {
            members_required: k as u32,
            real,
            ci_lower: ci.lower,
            ci_upper: ci.upper,
        })
        .collect();

    let aroc_ci = aroc.confidence_interval(level);
    StepOutput {
        lead_step: step,
        days_total: day_set.len(),
        days_present: day_set.n_present(),
        aroc: ScalarScore {
            real: *aroc.real(),
            ci_lower: aroc_ci.lower,
            ci_upper: aroc_ci.upper,
        },
        frequency_bias,
        aroc_distribution: full_distributions.then(|| aroc.resamples().to_vec()),
        frequency_bias_distribution: full_distributions.then(|| fb.resamples().to_vec()),
    }
}

#[derive(Serialize)]
struct TupleOutput {
    system: String,
    region: String,
    effci: u8,
    magnitude: u8,
    accumulation_hours: u32,
    period_start: NaiveDate,
    period_end: NaiveDate,
    repetitions: usize,
    seed: u64,
    confidence_level: f64,
    steps: Vec<StepOutput>,
}

#[derive(Serialize)]
struct StepOutput {
    lead_step: u32,
    days_total: usize,
    days_present: usize,
    aroc: ScalarScore,
    frequency_bias: Vec<RuleScore>,
    #[serde(skip_serializing_if = "Option::is_none")]
    aroc_distribution: Option<Vec<f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    frequency_bias_distribution: Option<Vec<Vec<f64>>>,
}

#[derive(Serialize)]
struct ScalarScore {
    real: f64,
    ci_lower: f64,
    ci_upper: f64,
}

#[derive(Serialize)]
struct RuleScore {
    members_required: u32,
    real: f64,
    ci_lower: f64,
    ci_upper: f64,
}
