// src/cli.rs
use std::{env, fs, path::PathBuf, sync::Arc};

use chrono::{Local, NaiveDateTime};
use color_eyre::eyre::{Result, WrapErr, eyre};

use crate::config::consts::POWELL_SERVICES;
use crate::config::{Catalog, EngineOptions, StaticScheduleTable};
use crate::error::HoursError;
use crate::hours::format::{TimeFormat, format_instant};
use crate::hours::{ChangeType, EntityStatus, ScheduleStore, StatusResolver};
use crate::log::{self, LogTarget};
use crate::normalize::CatalogMatcher;
use crate::specs::{self, library};

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Params {
    pub at: Option<NaiveDateTime>,
    pub entities: Vec<String>,
    pub markup: Vec<PathBuf>,
    pub static_table: Option<PathBuf>,
    pub horizon: Option<u32>,
    pub meal_switch: bool,
    pub json: bool,
    pub clock: TimeFormat,
    pub log: Option<PathBuf>,
}

pub fn run() -> Result<()> {
    let Some(params) = parse_args(env::args().skip(1))? else {
        eprintln!(include_str!("cli_help.txt"));
        return Ok(());
    };

    let target = match &params.log {
        Some(path) => LogTarget::File(path.clone()),
        None => LogTarget::Stderr,
    };
    log::init(target)?;

    let table = match &params.static_table {
        Some(path) => StaticScheduleTable::from_path(path).inspect_err(|e| loge!("static table: {e}"))?,
        None => StaticScheduleTable::builtin(),
    };

    let opts = engine_options(&params)?;
    let now = params.at.unwrap_or_else(|| Local::now().naive_local());
    let catalog = Catalog::builtin();
    let matcher = CatalogMatcher::new(&catalog);

    let mut store = ScheduleStore::new(Arc::new(table));
    for path in &params.markup {
        let text = fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
        let extraction = specs::extract(&text, now.date());
        let matched = store.ingest(&extraction, &matcher);
        logf!("{}: {} entities", path.display(), matched);
    }

    let ids: Vec<String> = if params.entities.is_empty() {
        catalog.ids().map(String::from).collect()
    } else {
        params.entities.clone()
    };

    let resolver = StatusResolver::new(store, opts);
    let statuses = resolver.status_all(&ids, now);

    if params.json {
        println!("{}", serde_json::to_string_pretty(&statuses)?);
        return Ok(());
    }

    for st in &statuses {
        let name = catalog.get(&st.entity_id).map_or(st.entity_id.as_str(), |e| e.name.as_str());
        println!("{name}: {}", describe(st, now, resolver.options().time_format));

        if st.entity_id == "powell" {
            let entries = resolver.source().extracted(&st.entity_id, now.date());
            for svc in library::service_summary(entries, &POWELL_SERVICES) {
                let hours = svc.hours.as_deref().unwrap_or("");
                println!("    {}: {:?} {hours}", svc.name, svc.status);
            }
        }
    }
    Ok(())
}

pub fn engine_options(params: &Params) -> Result<EngineOptions> {
    let mut opts = EngineOptions::default().with_meal_switch(params.meal_switch);
    if let Some(days) = params.horizon {
        opts = opts.with_horizon(days);
    }
    opts.time_format = params.clock;
    Ok(opts.validate()?)
}

/// One human line: `open (Dinner) until 9:00 PM`, `closed, opens Wed 7:00 AM`.
pub fn describe(st: &EntityStatus, now: NaiveDateTime, clock: TimeFormat) -> String {
    let when = |at: NaiveDateTime| {
        let time = format_instant(at, clock);
        if at.date() == now.date() { time } else { format!("{} {time}", at.format("%a")) }
    };

    match (st.open_now, st.next_change_at, st.next_change_type) {
        (true, Some(at), Some(ChangeType::MealSwitch)) => {
            format!("open ({}) until {}, then next meal", st.current_label.as_deref().unwrap_or("-"), when(at))
        }
        (true, Some(at), _) => match st.current_label.as_deref() {
            Some(label) => format!("open ({label}) until {}", when(at)),
            None => format!("open until {}", when(at)),
        },
        (true, None, _) => s!("open"),
        (false, Some(at), _) => format!("closed, opens {}", when(at)),
        (false, None, _) => s!("closed, no upcoming opening"),
    }
}

/// `Ok(None)` means help was requested.
pub fn parse_args<I: IntoIterator<Item = String>>(args: I) -> Result<Option<Params>> {
    let mut params = Params::default();
    let mut args = args.into_iter();

    while let Some(a) = args.next() {
        let mut value = || args.next().ok_or_else(|| eyre!("missing value for {a}"));
        match a.as_str() {
            "--at" => {
                let v = value()?;
                let at = NaiveDateTime::parse_from_str(&v, "%Y-%m-%dT%H:%M")
                    .map_err(|_| HoursError::InvalidTimestamp(v.clone()))?;
                params.at = Some(at);
            }
            "-e" | "--entity" => params.entities.push(value()?),
            "-m" | "--markup" => params.markup.push(PathBuf::from(value()?)),
            "--static" => params.static_table = Some(PathBuf::from(value()?)),
            "--horizon" => {
                let v = value()?;
                let days: u32 = v.parse().wrap_err_with(|| format!("bad --horizon {v:?}"))?;
                params.horizon = Some(days);
            }
            "--meal-switch" => params.meal_switch = true,
            "--json" => params.json = true,
            "--24h" => params.clock = TimeFormat::H24,
            "--log" => params.log = Some(PathBuf::from(value()?)),
            "-h" | "--help" => return Ok(None),
            _ => return Err(eyre!("unknown arg: {a}")),
        }
    }

    Ok(Some(params))
}
