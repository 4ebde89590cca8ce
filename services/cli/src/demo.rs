use crate::render::{render_cause_effect, render_report};
use nbs_discharge::error::AppError;
use nbs_discharge::workflows::screening::{DischargeInputs, DischargeReport};

/// Ward situations walked through by `nbs-discharge demo`.
const DEMO_CASES: [(f64, bool, Option<&str>); 4] = [
    (20.0, true, Some("sohar")),
    (20.0, false, Some("sohar")),
    (24.0, false, Some("saham")),
    (5.0, false, Some("khabourah_suwaiq")),
];

pub(crate) fn demo_reports() -> Result<Vec<DischargeReport>, AppError> {
    DEMO_CASES
        .iter()
        .map(|(age_hours, can_delay, wilayat)| -> Result<DischargeReport, AppError> {
            let inputs =
                DischargeInputs::new(*age_hours, *can_delay, wilayat.map(str::to_string))?;
            Ok(DischargeReport::standard(inputs))
        })
        .collect()
}

pub(crate) fn render_demo(reports: &[DischargeReport]) -> String {
    let mut sections: Vec<String> = reports.iter().map(render_report).collect();
    sections.push(render_cause_effect());
    sections.join("\n\n---\n\n")
}
