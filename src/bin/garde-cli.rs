#![forbid(unsafe_code)]
use anyhow::{Context, Result};
use garde::{
    io,
    model::RoleLabel,
    scheduler::{RotationOptions, Scheduler, ViolationKind},
};
use clap::{Args, Parser, Subcommand};
#[cfg(feature = "logging")]
use tracing_subscriber::{fmt::Subscriber, EnvFilter};

/// CLI de rotation multi-semaines
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Active les logs (feature `logging`)
    #[arg(long, global = true)]
    log: bool,

    #[command(subcommand)]
    cmd: Commands,
}

/// Entrées communes : roster, congés, options
#[derive(Args, Debug)]
struct RosterArgs {
    /// CSV `id,name,capabilities[,fixed_days]`
    #[arg(long)]
    workers: String,
    /// CSV `worker_id,start[,end]` (nécessite --start)
    #[arg(long)]
    leave: Option<String>,
    /// Options JSON (champs absents = valeurs par défaut)
    #[arg(long)]
    options: Option<String>,
    /// Date du jour 1 (YYYY-MM-DD)
    #[arg(long)]
    start: Option<String>,
    /// Surcharge du nombre de semaines
    #[arg(long)]
    weeks: Option<u16>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Calculer un plan et son rapport d'équité
    Plan {
        #[command(flatten)]
        roster: RosterArgs,
        #[arg(long)]
        out_json: Option<String>,
        #[arg(long)]
        out_csv: Option<String>,
        /// Export JSON du rapport d'équité
        #[arg(long)]
        report: Option<String>,
    },

    /// Vérifier un plan JSON existant
    Check {
        #[command(flatten)]
        roster: RosterArgs,
        #[arg(long)]
        plan: String,
    },
}

fn build_scheduler(args: &RosterArgs) -> Result<Scheduler> {
    let mut opts = match &args.options {
        Some(path) => io::load_options_json(path)?,
        None => RotationOptions::default(),
    };
    if let Some(weeks) = args.weeks {
        opts.horizon_weeks = weeks;
    }

    let mut scheduler = Scheduler::new(opts)?;
    scheduler.add_workers(io::import_workers_csv(&args.workers)?)?;
    if let Some(start) = &args.start {
        scheduler.set_start_date(io::parse_date(start)?)?;
    }
    if let Some(path) = &args.leave {
        for range in io::import_leave_csv(path)? {
            scheduler
                .add_leave(&range.worker, range.start, range.end)
                .with_context(|| format!("leave for worker {}", range.worker))?;
        }
    }
    Ok(scheduler)
}

fn role_tag(role: RoleLabel) -> &'static str {
    match role {
        RoleLabel::Charge => "C1",
        RoleLabel::BackupCharge => "C2",
        RoleLabel::Specialist => "SP",
        RoleLabel::Generic => "S",
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    if cli.log {
        let _ = Subscriber::builder()
            .with_env_filter(EnvFilter::from_default_env())
            .try_init();
    }

    let code = match cli.cmd {
        Commands::Plan {
            roster,
            out_json,
            out_csv,
            report,
        } => {
            let scheduler = build_scheduler(&roster)?;
            let outcome = scheduler.run();

            if let Some(path) = out_json {
                io::export_plan_json(path, &outcome.plan)?;
            }
            if let Some(path) = out_csv {
                io::export_plan_csv(path, &outcome.plan)?;
            }
            if let Some(path) = report {
                io::export_report_json(path, &outcome.report)?;
            }

            // impression compacte
            for (week, day) in outcome.plan.days() {
                let staff: Vec<String> = day
                    .assignments
                    .iter()
                    .map(|a| format!("{}:{}", a.worker, role_tag(a.role)))
                    .collect();
                let date = outcome
                    .plan
                    .date_of(day.offset)
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "-".to_string());
                println!("W{week} D{} | {date} | {}", day.day, staff.join(" "));
            }

            let dist = &outcome.report.total_days;
            println!(
                "fairness score: {:.2} | mean {:.1} | std dev {:.2} | min {} | max {} | range {}",
                outcome.report.fairness_score, dist.mean, dist.std_dev, dist.min, dist.max, dist.range
            );
            for stats in &outcome.report.workers {
                println!(
                    "{} ({}): {} days ({:.1}/week) {:?}",
                    stats.worker, stats.name, stats.total_days, stats.avg_days_per_week, stats.weekly
                );
            }

            if outcome.plan.shortfalls.is_empty() {
                0
            } else {
                eprintln!("Found {} shortfall(s)", outcome.plan.shortfalls.len());
                for shortfall in &outcome.plan.shortfalls {
                    eprintln!("  {shortfall}");
                }
                // Code 2 = WARNING/INCOMPLETE
                2
            }
        }
        Commands::Check { roster, plan } => {
            let scheduler = build_scheduler(&roster)?;
            let plan = io::load_plan_json(plan)?;
            let violations = scheduler.detect_violations(&plan);
            if violations.is_empty() {
                println!("OK: no violations");
                0
            } else {
                eprintln!("Found {} violation(s)", violations.len());
                for v in &violations {
                    let offset = v.offset.map(|o| o.to_string()).unwrap_or_else(|| "-".into());
                    eprintln!(
                        "  {} week {} offset {}: {}",
                        v.worker.as_ref().map_or("-", |w| w.as_str()),
                        v.week,
                        offset,
                        match v.kind {
                            ViolationKind::DoubleBooking => "double",
                            ViolationKind::OverWeeklyCap => "cap",
                            ViolationKind::OnLeave => "leave",
                            ViolationKind::OutsideFixedRotation => "rotation",
                            ViolationKind::UnknownWorker => "unknown",
                            ViolationKind::MisplacedDay => "misplaced",
                            ViolationKind::HorizonMismatch => "horizon",
                        }
                    );
                }
                2
            }
        }
    };

    std::process::exit(code);
}
