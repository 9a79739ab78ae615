// Conclusion composition from analysis results
use super::analysis::Analysis;
use super::reading::Metric;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
}

/// A classified, human-readable finding. Severity drives presentation
/// styling only; ordering comes from the rule list.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conclusion {
    pub severity: Severity,
    pub text: String,
}

impl Conclusion {
    fn new(severity: Severity, text: String) -> Self {
        Self { severity, text }
    }
}

/// Map an analysis bundle to an ordered list of findings and
/// recommendations. Rules fire in a fixed order; the CO2-level and
/// overall-assessment rules always emit exactly one conclusion each.
pub fn compose_conclusions(analysis: &Analysis) -> Vec<Conclusion> {
    let mut conclusions = Vec::new();

    let co2_avg = analysis.averages.co2;
    let co2_trend = analysis.trends.co2;
    let methane_avg = analysis.averages.methane;
    let energy_avg = analysis.averages.energy_intensity;

    // 1. CO2 level
    if co2_avg > 66.0 {
        conclusions.push(Conclusion::new(
            Severity::High,
            format!(
                "Critical CO2 emission levels: average of {co2_avg:.1}% indicates significantly high carbon output."
            ),
        ));
    } else if co2_avg > 33.0 {
        conclusions.push(Conclusion::new(
            Severity::Medium,
            format!("Moderate CO2 emission levels: average of {co2_avg:.1}% requires attention."),
        ));
    } else {
        conclusions.push(Conclusion::new(
            Severity::Low,
            format!("CO2 emission levels: average of {co2_avg:.1}% is within acceptable range."),
        ));
    }

    // 2. CO2 trend; nothing is emitted at exactly zero
    if co2_trend > 2.0 {
        conclusions.push(Conclusion::new(
            Severity::Info,
            format!(
                "CO2 emissions are increasing at an alarming rate of {co2_trend:.1}% per measurement period."
            ),
        ));
    } else if co2_trend > 0.0 {
        conclusions.push(Conclusion::new(
            Severity::Info,
            format!(
                "CO2 emissions are gradually increasing at {co2_trend:.1}% per measurement period."
            ),
        ));
    } else if co2_trend < -2.0 {
        conclusions.push(Conclusion::new(
            Severity::Info,
            format!(
                "CO2 emissions are decreasing significantly at {:.1}% per measurement period.",
                -co2_trend
            ),
        ));
    } else if co2_trend < 0.0 {
        conclusions.push(Conclusion::new(
            Severity::Info,
            format!(
                "CO2 emissions are gradually decreasing at {:.1}% per measurement period.",
                -co2_trend
            ),
        ));
    }

    // 3. Methane level; only the high tier exists for methane
    if methane_avg > 50.0 {
        conclusions.push(Conclusion::new(
            Severity::High,
            format!(
                "High methane emissions: average of {methane_avg:.1}% indicates significant methane release."
            ),
        ));
    }

    // 4. Energy intensity; silent between 30 and 70
    if energy_avg > 70.0 {
        conclusions.push(Conclusion::new(
            Severity::High,
            format!(
                "High energy intensity: average of {energy_avg:.1}% indicates inefficient energy usage."
            ),
        ));
    } else if energy_avg < 30.0 {
        conclusions.push(Conclusion::new(
            Severity::Low,
            format!(
                "Low energy intensity: average of {energy_avg:.1}% indicates efficient energy usage."
            ),
        ));
    }

    // 5. CO2/energy correlation insight
    if let Some(r) = analysis
        .correlations
        .get(Metric::Co2, Metric::EnergyIntensity)
    {
        if r.abs() > 0.7 {
            conclusions.push(Conclusion::new(
                Severity::Info,
                format!(
                    "Strong correlation ({r:.2}) between CO2 emissions and energy intensity suggests that energy efficiency improvements could significantly reduce carbon emissions."
                ),
            ));
        }
    }

    // 6. Overall assessment
    let overall_avg = analysis.averages.overall_mean();
    if overall_avg > 60.0 {
        conclusions.push(Conclusion::new(
            Severity::High,
            "Overall assessment: emission levels are critically high. Immediate action required."
                .to_string(),
        ));
    } else if overall_avg > 40.0 {
        conclusions.push(Conclusion::new(
            Severity::Medium,
            "Overall assessment: emission levels are moderate. Monitoring and reduction strategies recommended."
                .to_string(),
        ));
    } else {
        conclusions.push(Conclusion::new(
            Severity::Low,
            "Overall assessment: emission levels are within acceptable range. Continue monitoring and maintaining current practices."
                .to_string(),
        ));
    }

    // 7. Recommendations
    if co2_avg > 50.0 || methane_avg > 40.0 {
        conclusions.push(Conclusion::new(
            Severity::Info,
            "Recommendation: implement carbon capture technologies and reduce methane leakage."
                .to_string(),
        ));
    }
    if energy_avg > 60.0 {
        conclusions.push(Conclusion::new(
            Severity::Info,
            "Recommendation: conduct an energy audit and implement efficiency measures.".to_string(),
        ));
    }

    conclusions
}
