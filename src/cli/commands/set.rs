use crate::cli::parser::{Commands, RecordArgs};
use crate::config::Config;
use crate::core::store::SaveOptions;
use crate::db::log::ttlog_or_warn;
use crate::errors::{AppError, AppResult, ValidationErrors};
use crate::models::schedule::ScheduleRecord;
use crate::ui::messages::{error, info, success};
use crate::ui::render::{record_card, record_preview};

/// Overlay the given fields on `base`.
pub fn merge(base: &ScheduleRecord, args: &RecordArgs) -> ScheduleRecord {
    let pick = |new: &Option<String>, old: &String| new.clone().unwrap_or_else(|| old.clone());

    ScheduleRecord {
        title: pick(&args.title, &base.title),
        topic: pick(&args.topic, &base.topic),
        subtitle: pick(&args.subtitle, &base.subtitle),
        date: pick(&args.date, &base.date),
        start_time: pick(&args.start, &base.start_time),
        end_time: pick(&args.end, &base.end_time),
        join_link: pick(&args.link, &base.join_link),
    }
}

fn report(errors: &ValidationErrors) {
    for e in errors.iter() {
        error(format!("{} ({}): {}", e.field, e.field.cli_flag(), e.reason));
    }
}

/// Handle the `set` command
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let Commands::Set {
        fields,
        allow_past,
        dry_run,
    } = cmd
    else {
        return Ok(());
    };

    let mut store = super::open_store(cfg)?;
    let candidate = merge(&store.current(), fields);

    if *dry_run {
        println!("{}\n", record_preview(&candidate));
        return match store.validate(&candidate) {
            Ok(()) => {
                success("Schedule is valid (dry run, nothing saved)");
                Ok(())
            }
            Err(errors) => {
                report(&errors);
                Err(errors.into())
            }
        };
    }

    let opts = SaveOptions {
        allow_past_schedule: *allow_past || cfg.allow_past_schedule,
    };

    match store.save(&candidate, opts) {
        Ok(()) => {
            ttlog_or_warn(
                store.storage().conn(),
                "set",
                store.key(),
                &format!(
                    "{} on {} {}-{}",
                    candidate.title, candidate.date, candidate.start_time, candidate.end_time
                ),
            );
            success("Schedule saved");
            println!("{}", record_card(&candidate));

            if opts.allow_past_schedule
                && let Ok(target) = candidate.target_instant()
                && target < chrono::Local::now()
            {
                info("The saved class has already started.");
            }
            Ok(())
        }
        Err(AppError::Validation(errors)) => {
            report(&errors);
            Err(AppError::Validation(errors))
        }
        Err(e) => Err(e),
    }
}
