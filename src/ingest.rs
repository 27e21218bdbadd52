use std::io::Read;

use anyhow::{anyhow, Context};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use uuid::Uuid;

use crate::dates::parse_timestamp;
use crate::models::{Inspection, WorkOrder};

#[derive(Debug, Deserialize)]
struct InspectionRow {
    #[serde(default)]
    inspection_id: Option<String>,
    site_id: String,
    inspector_name: String,
    inspection_date: String,
    notes: String,
    status: String,
    #[serde(default)]
    inspection_type: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WorkOrderRow {
    #[serde(default)]
    work_order_id: Option<String>,
    site_id: String,
    #[serde(default)]
    vendor_id: Option<String>,
    title: String,
    description: String,
    #[serde(default)]
    priority: Option<String>,
    status: String,
    created_date: String,
    due_date: String,
    #[serde(default)]
    completed_date: Option<String>,
    #[serde(default)]
    estimated_cost: Option<f64>,
    #[serde(default)]
    actual_cost: Option<f64>,
}

fn id_or_new(id: Option<String>) -> String {
    id.filter(|value| !value.trim().is_empty())
        .unwrap_or_else(|| Uuid::new_v4().to_string())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

fn timestamp(value: &str, column: &str, line: usize) -> anyhow::Result<DateTime<Utc>> {
    parse_timestamp(value).ok_or_else(|| anyhow!("line {line}: invalid {column} {value:?}"))
}

pub fn read_inspections<R: Read>(input: R) -> anyhow::Result<Vec<Inspection>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut inspections = Vec::new();

    for (index, result) in reader.deserialize::<InspectionRow>().enumerate() {
        let line = index + 2;
        let row = result.with_context(|| format!("line {line}: malformed inspection row"))?;
        inspections.push(Inspection {
            inspection_id: id_or_new(row.inspection_id),
            inspection_date: timestamp(&row.inspection_date, "inspection_date", line)?,
            site_id: row.site_id,
            inspector_name: row.inspector_name,
            notes: row.notes,
            status: row.status,
            inspection_type: non_empty(row.inspection_type),
            confidence_score: None,
        });
    }

    Ok(inspections)
}

pub fn read_work_orders<R: Read>(input: R) -> anyhow::Result<Vec<WorkOrder>> {
    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(input);
    let mut work_orders = Vec::new();

    for (index, result) in reader.deserialize::<WorkOrderRow>().enumerate() {
        let line = index + 2;
        let row = result.with_context(|| format!("line {line}: malformed work order row"))?;
        let completed_date = match non_empty(row.completed_date) {
            Some(value) => Some(timestamp(&value, "completed_date", line)?),
            None => None,
        };
        work_orders.push(WorkOrder {
            work_order_id: id_or_new(row.work_order_id),
            created_date: timestamp(&row.created_date, "created_date", line)?,
            due_date: timestamp(&row.due_date, "due_date", line)?,
            completed_date,
            site_id: row.site_id,
            vendor_id: non_empty(row.vendor_id),
            title: row.title,
            description: row.description,
            priority: non_empty(row.priority).unwrap_or_else(|| "medium".to_string()),
            status: row.status,
            estimated_cost: row.estimated_cost,
            actual_cost: row.actual_cost,
        });
    }

    Ok(work_orders)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn inspections_get_generated_ids_when_missing() {
        let csv = "\
site_id,inspector_name,inspection_date,notes,status,inspection_type
site_001,John Smith,2026-01-04T10:00:00Z,\"HVAC filter needs replacement. Exit sign out.\",completed,routine
site_002,Ana Ruiz,2026-01-05,Water stain in break room,completed,
";
        let inspections = read_inspections(csv.as_bytes()).unwrap();
        assert_eq!(inspections.len(), 2);
        assert!(Uuid::parse_str(&inspections[0].inspection_id).is_ok());
        assert_ne!(inspections[0].inspection_id, inspections[1].inspection_id);
        assert_eq!(inspections[0].notes, "HVAC filter needs replacement. Exit sign out.");
        assert_eq!(inspections[0].inspection_type.as_deref(), Some("routine"));
        assert_eq!(inspections[1].inspection_type, None);
        assert_eq!(
            inspections[1].inspection_date,
            Utc.with_ymd_and_hms(2026, 1, 5, 0, 0, 0).unwrap()
        );
    }

    #[test]
    fn explicit_inspection_id_is_kept() {
        let csv = "\
inspection_id,site_id,inspector_name,inspection_date,notes,status
insp_001,site_001,John Smith,2026-01-04 10:00:00,All clear,completed
";
        let inspections = read_inspections(csv.as_bytes()).unwrap();
        assert_eq!(inspections[0].inspection_id, "insp_001");
    }

    #[test]
    fn bad_date_names_line_and_column() {
        let csv = "\
site_id,inspector_name,inspection_date,notes,status
site_001,John Smith,yesterday,All clear,completed
";
        let err = read_inspections(csv.as_bytes()).unwrap_err();
        let message = err.to_string();
        assert!(message.contains("line 2"), "{message}");
        assert!(message.contains("inspection_date"), "{message}");
    }

    #[test]
    fn work_orders_default_priority_and_parse_dates() {
        let csv = "\
site_id,title,description,status,created_date,due_date,priority,vendor_id,estimated_cost,completed_date
site_001,Replace HVAC Filter,Replace main filter in rooftop unit,late,2026-01-01T09:00:00Z,2026-01-05T17:00:00Z,,vendor_001,150.0,
";
        let work_orders = read_work_orders(csv.as_bytes()).unwrap();
        assert_eq!(work_orders.len(), 1);
        let order = &work_orders[0];
        assert_eq!(order.priority, "medium");
        assert_eq!(order.vendor_id.as_deref(), Some("vendor_001"));
        assert_eq!(order.estimated_cost, Some(150.0));
        assert_eq!(order.completed_date, None);
        assert_eq!(order.due_date, Utc.with_ymd_and_hms(2026, 1, 5, 17, 0, 0).unwrap());
    }

    #[test]
    fn missing_required_column_is_an_error() {
        let csv = "site_id,title\nsite_001,Fix door\n";
        assert!(read_work_orders(csv.as_bytes()).is_err());
    }
}
