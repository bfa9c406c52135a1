use anyhow::{Context, Result};
use drg_core::AnalysisSession;
use drg_ingest::Ingested;
use drg_model::{AnalysisOptions, RepresentativePolicy, TableKind};
use tracing::{debug, info, info_span};

use crate::cli::{Cli, Command, IngestCommand, LossesArgs, SimilarArgs, UsageArgs};
use crate::logging::redact_value;
use crate::output::{
    IngestReport, Printer, breakdown_table, case_table, ingest_table, loss_table, overview_table,
    search_table, table_counts_table, usage_summary_table, usage_table,
};
use crate::settings::Settings;

/// Effective analysis options: settings file first, then CLI flags.
pub fn analysis_options(cli: &Cli, settings: &Settings) -> AnalysisOptions {
    let options = settings.analysis_options();
    if cli.lenient_groups {
        options.with_representative(RepresentativePolicy::FirstSeen)
    } else {
        options
    }
}

pub fn run(cli: &Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref())?;
    let database = cli
        .database
        .clone()
        .unwrap_or_else(|| settings.database.clone());
    debug!(database = %database.display(), "opening database");
    let mut session = AnalysisSession::open(&database, analysis_options(cli, &settings))
        .with_context(|| format!("open database {}", database.display()))?;
    let printer = Printer::new(cli.json);

    match &cli.command {
        Command::Ingest(command) => run_ingest(&mut session, command, &printer),
        Command::Losses(args) => run_losses(&session, args, &printer),
        Command::Search { query } => {
            printer.rows(&session.search_diseases(query)?, search_table)
        }
        Command::Departments { disease } => {
            printer.rows(&session.department_breakdown(disease)?, breakdown_table)
        }
        Command::Groups {
            disease,
            department,
        } => printer.rows(
            &session.treatment_group_breakdown(disease, department)?,
            breakdown_table,
        ),
        Command::Overview { disease } => {
            printer.rows(&session.disease_cost_overview(disease)?, overview_table)
        }
        Command::Cases { disease } => printer.rows(&session.cases_for_disease(disease)?, |rows| {
            case_table(rows, None)
        }),
        Command::Similar(args) => run_similar(&session, args, &printer),
        Command::Usage(args) => run_usage(&session, args, &printer),
        Command::Tables => printer.value(&session.table_counts()?, |counts| {
            table_counts_table(counts)
        }),
    }
}

fn run_ingest(
    session: &mut AnalysisSession,
    command: &IngestCommand,
    printer: &Printer,
) -> Result<()> {
    let report = match command {
        IngestCommand::Disease { file } => {
            let _span = info_span!("ingest", table = TableKind::Disease.label()).entered();
            let ingested = session
                .ingest_disease_file(file)
                .with_context(|| format!("ingest {}", file.display()))?;
            report(TableKind::Disease, ingested)
        }
        IngestCommand::Cases { file } => {
            let _span = info_span!("ingest", table = TableKind::Case.label()).entered();
            let ingested = session
                .ingest_case_file(file)
                .with_context(|| format!("ingest {}", file.display()))?;
            report(TableKind::Case, ingested)
        }
        IngestCommand::Consumables { files } => {
            let _span = info_span!("ingest", table = TableKind::Consumable.label()).entered();
            let ingested = session
                .ingest_consumable_files(files)
                .context("ingest consumable usage files")?;
            report(TableKind::Consumable, ingested)
        }
    };
    info!(table = report.table.label(), rows = report.rows, "ingestion complete");

    if printer.is_json() {
        return printer.value(&report, ingest_table);
    }
    println!("{} rows loaded into {}", report.rows, report.table.label());
    if !report.warnings.is_empty() {
        println!("{} values were not numeric and were left empty:", report.warnings.len());
        println!("{}", ingest_table(&report));
    }
    Ok(())
}

fn report<R>(table: TableKind, ingested: Ingested<R>) -> IngestReport {
    IngestReport {
        table,
        rows: ingested.records.len(),
        warnings: ingested.warnings,
    }
}

fn run_losses(session: &AnalysisSession, args: &LossesArgs, printer: &Printer) -> Result<()> {
    match args.extra {
        None => printer.rows(&session.top_losses()?, |rows| loss_table(rows, 1)),
        Some(extra) => {
            let first_rank = session.options().top_loss_count + 1;
            printer.rows(&session.extra_losses(extra)?, |rows| {
                loss_table(rows, first_rank)
            })
        }
    }
}

fn run_similar(session: &AnalysisSession, args: &SimilarArgs, printer: &Printer) -> Result<()> {
    let mut options = session.options().similarity;
    if let Some(window) = args.window {
        options = options.with_window(window);
    }
    if args.no_promote {
        options = options.with_promote_reference(false);
    }
    info!(
        disease = %args.disease,
        patient = redact_value(&args.patient),
        window = options.window,
        "finding similar cases"
    );
    let similar = session.similar_cases_with(&args.disease, &args.patient, &options)?;
    let reference = similar
        .rows
        .iter()
        .find(|case| case.patient_name == args.patient)
        .cloned();
    printer.rows(&similar, |rows| case_table(rows, reference.as_ref()))
}

fn run_usage(session: &AnalysisSession, args: &UsageArgs, printer: &Printer) -> Result<()> {
    info!(
        patient = redact_value(&args.patient),
        record_number = redact_value(&args.record_number),
        detail = args.detail,
        "consumable usage"
    );
    if args.detail {
        printer.rows(
            &session.consumable_usage(&args.patient, &args.record_number)?,
            usage_table,
        )
    } else {
        printer.rows(
            &session.consumable_usage_summary(&args.patient, &args.record_number)?,
            usage_summary_table,
        )
    }
}
