use crate::model::{Capability, RotationPlan, Worker, WorkerId};
use crate::report::FairnessReport;
use crate::scheduler::RotationOptions;
use anyhow::{bail, Context};
use chrono::NaiveDate;
use csv::{ReaderBuilder, WriterBuilder};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Congé brut lu depuis un fichier, avant traduction en offsets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeaveRange {
    pub worker: WorkerId,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Import des membres depuis CSV: header `id,name,capabilities[,fixed_days]`
///
/// Les listes sont séparées par `;` (ex. `charge;generic`, `1;6;7`).
pub fn import_workers_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<Worker>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let id = rec.get(0).context("missing id")?.trim();
        let name = rec.get(1).context("missing name")?.trim();
        if id.is_empty() || name.is_empty() {
            bail!("invalid worker row (empty)");
        }
        let capabilities = parse_capabilities(rec.get(2).unwrap_or(""))
            .with_context(|| format!("invalid capabilities for worker {id}"))?;
        let mut worker = Worker::new(id, name, capabilities);
        if let Some(days) = rec.get(3) {
            let days = days.trim();
            if !days.is_empty() {
                let days = parse_weekdays(days)
                    .with_context(|| format!("invalid fixed_days for worker {id}"))?;
                worker = worker.with_fixed_weekdays(days);
            }
        }
        out.push(worker);
    }
    Ok(out)
}

fn parse_capabilities(raw: &str) -> anyhow::Result<BTreeSet<Capability>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| chunk.parse::<Capability>().map_err(anyhow::Error::msg))
        .collect()
}

fn parse_weekdays(raw: &str) -> anyhow::Result<BTreeSet<u8>> {
    raw.split(';')
        .filter(|chunk| !chunk.trim().is_empty())
        .map(|chunk| -> anyhow::Result<u8> {
            let day: u8 = chunk.trim().parse().context("expected weekday number")?;
            if !(1..=7).contains(&day) {
                bail!("weekday must be within 1..=7, got {day}");
            }
            Ok(day)
        })
        .collect()
}

/// Import de congés: header `worker_id,start[,end]` (dates `YYYY-MM-DD`, bornes incluses)
pub fn import_leave_csv<P: AsRef<Path>>(path: P) -> anyhow::Result<Vec<LeaveRange>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)?;
    let mut out = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let worker = rec.get(0).context("missing worker_id")?.trim();
        if worker.is_empty() {
            bail!("invalid leave row (empty worker_id)");
        }
        let start = parse_date(rec.get(1).context("missing start")?)?;
        let end = match rec.get(2).map(str::trim) {
            Some(raw) if !raw.is_empty() => parse_date(raw)?,
            _ => start,
        };
        out.push(LeaveRange {
            worker: WorkerId::new(worker),
            start,
            end,
        });
    }
    Ok(out)
}

pub fn parse_date(raw: &str) -> anyhow::Result<NaiveDate> {
    let raw = raw.trim();
    NaiveDate::parse_from_str(raw, "%Y-%m-%d").with_context(|| format!("invalid date: {raw}"))
}

/// Options JSON partielles ; les champs absents prennent leur valeur par défaut.
pub fn load_options_json<P: AsRef<Path>>(path: P) -> anyhow::Result<RotationOptions> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let opts = serde_json::from_slice(&data)
        .with_context(|| format!("parsing options {}", path.display()))?;
    Ok(opts)
}

pub fn load_plan_json<P: AsRef<Path>>(path: P) -> anyhow::Result<RotationPlan> {
    let path = path.as_ref();
    let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let plan = serde_json::from_slice(&data)
        .with_context(|| format!("parsing plan {}", path.display()))?;
    Ok(plan)
}

/// Export JSON du plan (écriture atomique)
pub fn export_plan_json<P: AsRef<Path>>(path: P, plan: &RotationPlan) -> anyhow::Result<()> {
    write_json_atomic(path.as_ref(), plan)
}

pub fn export_report_json<P: AsRef<Path>>(path: P, report: &FairnessReport) -> anyhow::Result<()> {
    write_json_atomic(path.as_ref(), report)
}

fn write_json_atomic<T: Serialize>(path: &Path, value: &T) -> anyhow::Result<()> {
    let json = serde_json::to_vec_pretty(value)?;
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    let mut tmp = NamedTempFile::new_in(dir).with_context(|| "creating temp file")?;
    tmp.write_all(&json)?;
    tmp.flush()?;
    tmp.as_file().sync_all()?;
    tmp.persist(path).with_context(|| "atomic rename")?;
    Ok(())
}

/// Export CSV du plan: header `week,day,offset,date,worker_id,role`
pub fn export_plan_csv<P: AsRef<Path>>(path: P, plan: &RotationPlan) -> anyhow::Result<()> {
    let mut w = WriterBuilder::new().has_headers(true).from_path(path)?;
    w.write_record(["week", "day", "offset", "date", "worker_id", "role"])?;
    let (mut week_buf, mut day_buf, mut offset_buf) =
        (itoa::Buffer::new(), itoa::Buffer::new(), itoa::Buffer::new());
    for (week, day) in plan.days() {
        let date = plan
            .date_of(day.offset)
            .map(|d| d.to_string())
            .unwrap_or_default();
        let week = week_buf.format(week);
        let day_idx = day_buf.format(day.day);
        let offset = offset_buf.format(day.offset);
        for a in &day.assignments {
            w.write_record([
                week,
                day_idx,
                offset,
                date.as_str(),
                a.worker.as_str(),
                a.role.as_str(),
            ])?;
        }
    }
    w.flush()?;
    Ok(())
}
