//! FILENAME: tests/common/mod.rs
//! Fixtures for case analytics integration tests.

#![allow(dead_code)]

use case_analytics::{index, CaseProductIndex, DataSnapshot};
use case_model::{CaseProductLine, CaseRecord, CaseStatus, Product};
use chrono::NaiveDate;

/// One product entry for the fixture builder.
#[derive(Debug, Clone)]
pub struct LineSpec {
    pub company: &'static str,
    pub own: bool,
    pub units: u32,
    pub category: Option<&'static str>,
    pub sub_category: Option<&'static str>,
    pub product_id: Option<u64>,
    pub product_name: &'static str,
}

impl LineSpec {
    pub fn own(company: &'static str, units: u32) -> Self {
        Self::new(company, true, units)
    }

    pub fn rival(company: &'static str, units: u32) -> Self {
        Self::new(company, false, units)
    }

    fn new(company: &'static str, own: bool, units: u32) -> Self {
        LineSpec {
            company,
            own,
            units,
            category: None,
            sub_category: None,
            product_id: None,
            product_name: "",
        }
    }

    pub fn category(mut self, category: &'static str, sub_category: &'static str) -> Self {
        self.category = Some(category);
        self.sub_category = Some(sub_category);
        self
    }

    pub fn product(mut self, id: u64, name: &'static str) -> Self {
        self.product_id = Some(id);
        self.product_name = name;
        self
    }
}

/// Builder for cases whose pre-aggregated totals agree with their lines.
#[derive(Debug, Clone, Default)]
pub struct Fixture {
    pub cases: Vec<CaseRecord>,
    pub lines: Vec<CaseProductLine>,
    pub products: Vec<Product>,
}

impl Fixture {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an approved case by rep "rep-1" with the given lines.
    pub fn case(self, id: u64, lines: &[LineSpec]) -> Self {
        self.case_by(id, "rep-1", &format!("Dr. {}", id), lines)
    }

    pub fn case_by(mut self, id: u64, rep: &str, doctor: &str, lines: &[LineSpec]) -> Self {
        let mut case = CaseRecord::new(id);
        case.status = CaseStatus::Approved;
        case.submitted_by = Some(rep.to_string());
        case.doctor_name = Some(doctor.to_string());
        case.account_name = Some(format!("{} Hospital", doctor));
        case.case_date = NaiveDate::from_ymd_opt(2024, 1, 1 + (id % 28) as u32);

        for (seq, spec) in lines.iter().enumerate() {
            let mut line = CaseProductLine::new(id, spec.company, spec.own);
            line.units = spec.units;
            line.category = spec.category.map(str::to_string);
            line.sub_category = spec.sub_category.map(str::to_string);
            line.product_id = spec.product_id;
            line.product_name = spec.product_name.to_string();
            line.sequence = Some(seq as i32 + 1);
            if spec.own {
                case.total_company_units += u64::from(spec.units);
            } else {
                case.total_competitor_units += u64::from(spec.units);
            }
            self.lines.push(line);
        }
        self.cases.push(case);
        self
    }

    pub fn catalog(mut self, id: u64, name: &str, own: bool) -> Self {
        self.products.push(Product {
            id: Some(id),
            name: name.to_string(),
            company_name: None,
            category: None,
            sub_category: None,
            is_company_product: own,
        });
        self
    }

    pub fn index(&self) -> CaseProductIndex {
        index(&self.lines)
    }

    pub fn snapshot(&self) -> DataSnapshot {
        DataSnapshot::new(self.cases.clone(), self.lines.clone(), self.products.clone())
    }

    /// Company-only, competitor-only and mixed case.
    pub fn three_cases() -> Self {
        Fixture::new()
            .case(1, &[LineSpec::own("A", 5)])
            .case(2, &[LineSpec::rival("B", 3)])
            .case(3, &[LineSpec::own("A", 2), LineSpec::rival("B", 4)])
    }

    /// Two reps, several categories and competitors.
    pub fn field_force() -> Self {
        Fixture::new()
            .case_by(
                10,
                "rep-1",
                "Dr. Adams",
                &[
                    LineSpec::own("Pharmo", 4).category("Cardio", "Statins").product(1, "Lipora"),
                    LineSpec::rival("Rival", 2).category("Cardio", "Statins").product(101, "Statix"),
                ],
            )
            .case_by(
                11,
                "rep-1",
                "Dr. Baker",
                &[
                    LineSpec::own("Pharmo", 1).category("Neuro", "SSRI").product(2, "Calmex"),
                    LineSpec::rival("Rival", 3).category("Neuro", "SSRI").product(102, "Serenix"),
                    LineSpec::rival("Medco", 5).category("Neuro", "SSRI").product(103, "Moodia"),
                ],
            )
            .case_by(
                12,
                "rep-2",
                "Dr. Adams",
                &[LineSpec::own("Pharmo", 6).category("Cardio", "Beta").product(3, "Betacor")],
            )
            .case_by(
                13,
                "rep-2",
                "Dr. Chen",
                &[LineSpec::rival("Medco", 7).category("Cardio", "Beta").product(104, "Betamed")],
            )
            .case_by(14, "rep-2", "Dr. Diaz", &[])
            .catalog(1, "Lipora", true)
            .catalog(5, "Dermacalm", true)
            .catalog(105, "Rivaderm", false)
    }
}
