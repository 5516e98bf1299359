use crate::models::{Employee, Sale};
use crate::sales_view::{parse_sale_date, DISPLAY_DATE_FORMAT};
use chrono::{Datelike, NaiveDate};
use serde::Serialize;
use std::collections::{BTreeMap, HashMap};

#[derive(Debug, Serialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Bar,
    Line,
}

/// Labels and values for one dataset, ready for the chart widget.
#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct ChartSeries {
    pub label: String,
    pub kind: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

impl ChartSeries {
    fn from_pairs(label: &str, kind: ChartKind, pairs: impl IntoIterator<Item = (String, f64)>) -> Self {
        let (labels, values): (Vec<String>, Vec<f64>) = pairs.into_iter().unzip();
        ChartSeries {
            label: label.to_string(),
            kind,
            labels,
            values,
        }
    }
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct SaleDetail {
    pub id: i64,
    pub date: String,
    pub amount: f64,
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EmployeeSalesSummary {
    pub employee_id: i64,
    pub employee_name: String,
    pub total_sales: f64,
    pub sale_count: usize,
    pub average_sale: f64,
    pub details: Vec<SaleDetail>,
}

impl EmployeeSalesSummary {
    fn empty(employee: &Employee) -> Self {
        EmployeeSalesSummary {
            employee_id: employee.id,
            employee_name: employee.name.clone(),
            total_sales: 0.0,
            sale_count: 0,
            average_sale: 0.0,
            details: Vec::new(),
        }
    }

    fn add(&mut self, sale: &Sale) {
        self.total_sales += sale.total;
        self.sale_count += 1;
        self.details.push(SaleDetail {
            id: sale.id,
            date: sale.date.clone(),
            amount: sale.total,
        });
    }

    fn finish(&mut self) {
        if self.sale_count > 0 {
            self.average_sale = self.total_sales / self.sale_count as f64;
        }
    }
}

/// One summary per employee, in the order employees are given.
/// Sales made by employees not in the list are left out.
pub fn employee_sales_report(sales: &[Sale], employees: &[Employee]) -> Vec<EmployeeSalesSummary> {
    let mut summaries: Vec<EmployeeSalesSummary> =
        employees.iter().map(EmployeeSalesSummary::empty).collect();
    let index: HashMap<i64, usize> = employees
        .iter()
        .enumerate()
        .map(|(i, e)| (e.id, i))
        .collect();

    for sale in sales {
        if let Some(&i) = index.get(&sale.employee_id) {
            summaries[i].add(sale);
        }
    }

    summaries.iter_mut().for_each(EmployeeSalesSummary::finish);
    summaries
}

#[derive(Debug, Serialize, Clone, PartialEq)]
pub struct EmployeeDetailReport {
    pub summary: EmployeeSalesSummary,
    pub sales: Vec<Sale>,
    /// Number of sales per month, labelled `M-YYYY`
    pub sales_by_month: ChartSeries,
    /// Sum of sale totals per day
    pub totals_by_date: ChartSeries,
}

pub fn employee_detail(
    sales: &[Sale],
    employees: &[Employee],
    employee_id: i64,
) -> Option<EmployeeDetailReport> {
    let employee = employees.iter().find(|e| e.id == employee_id)?;

    let own: Vec<Sale> = sales
        .iter()
        .filter(|s| s.employee_id == employee_id)
        .cloned()
        .collect();

    let mut summary = EmployeeSalesSummary::empty(employee);
    own.iter().for_each(|s| summary.add(s));
    summary.finish();

    let mut by_month: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for date in own.iter().filter_map(|s| parse_sale_date(&s.date)) {
        *by_month.entry((date.year(), date.month())).or_default() += 1.0;
    }

    let sales_by_month = ChartSeries::from_pairs(
        "Sales per month",
        ChartKind::Bar,
        by_month
            .into_iter()
            .map(|((year, month), count)| (format!("{}-{}", month, year), count)),
    );

    Some(EmployeeDetailReport {
        summary,
        totals_by_date: totals_by_date("Sales total", &own),
        sales: own,
        sales_by_month,
    })
}

fn totals_by_date(label: &str, sales: &[Sale]) -> ChartSeries {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for sale in sales {
        if let Some(date) = parse_sale_date(&sale.date) {
            *by_date.entry(date).or_default() += sale.total;
        }
    }

    ChartSeries::from_pairs(
        label,
        ChartKind::Line,
        by_date
            .into_iter()
            .map(|(date, total)| (date.format(DISPLAY_DATE_FORMAT).to_string(), total)),
    )
}

/// Store-wide revenue per day, oldest first.
pub fn daily_totals(sales: &[Sale]) -> ChartSeries {
    totals_by_date("Daily sales", sales)
}
