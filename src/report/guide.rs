//! Input guide: clinical reference ranges shown next to the input form.

use serde::Serialize;

use crate::types::RuleGroup;

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GuideEntry {
    pub parameter: RuleGroup,
    pub unit: &'static str,
    pub summary: &'static str,
    /// (band, range) pairs
    pub bands: &'static [(&'static str, &'static str)],
}

const GUIDE: [GuideEntry; 4] = [
    GuideEntry {
        parameter: RuleGroup::Glucose,
        unit: "mg/dL",
        summary: "Fasting blood sugar",
        bands: &[("Normal", "< 100"), ("Prediabetes", "100-125"), ("Diabetes", ">= 126")],
    },
    GuideEntry {
        parameter: RuleGroup::Bmi,
        unit: "kg/m²",
        summary: "Body-mass index",
        bands: &[("Normal", "18.5-24.9"), ("Overweight", "25-29.9"), ("Obese", ">= 30")],
    },
    GuideEntry {
        parameter: RuleGroup::Insulin,
        unit: "μIU/mL",
        summary: "Blood insulin level",
        bands: &[("Normal", "2.6-24.9"), ("High", "> 25")],
    },
    GuideEntry {
        parameter: RuleGroup::Age,
        unit: "years",
        summary: "Age in whole years",
        bands: &[],
    },
];

pub const fn input_guide() -> &'static [GuideEntry] {
    &GUIDE
}

pub fn render_guide() -> String {
    let mut out = String::from("Input guide\n");
    for entry in input_guide() {
        out.push_str(&format!(
            "\n{} ({}): {}\n",
            entry.parameter, entry.unit, entry.summary
        ));
        for (band, range) in entry.bands {
            out.push_str(&format!("  {band:<12} {range}\n"));
        }
    }
    out
}
