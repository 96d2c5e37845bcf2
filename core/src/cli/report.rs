use crate::selection::Segments;
use crate::types::Plan;
use std::fmt;

/// Text report summarizing a plan's beams and segments
pub struct PlanReport<'a> {
    plan: &'a Plan,
}

impl<'a> PlanReport<'a> {
    /// Creates a new text report
    pub fn new(plan: &'a Plan) -> Self {
        Self { plan }
    }
}

impl<'a> fmt::Display for PlanReport<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "RT Plan Summary")?;
        writeln!(f, "===============")?;
        writeln!(f)?;
        writeln!(
            f,
            "Patient ID:     {}",
            self.plan.patient_id.as_deref().unwrap_or("unknown")
        )?;
        writeln!(
            f,
            "Plan Name:      {}",
            self.plan.plan_name.as_deref().unwrap_or("unknown")
        )?;
        writeln!(
            f,
            "Plan Label:     {}",
            self.plan.plan_label.as_deref().unwrap_or("unknown")
        )?;
        writeln!(f, "Beams:          {}", self.plan.beams.len())?;

        for (index, beam) in self.plan.beams.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "Beam {}", index + 1)?;
            writeln!(f, "------")?;
            writeln!(f, "  Name:           {}", beam.name.as_deref().unwrap_or(""))?;
            writeln!(
                f,
                "  Description:    {}",
                beam.description.as_deref().unwrap_or("")
            )?;
            match self.plan.beam_meterset(index) {
                Some(meterset) => writeln!(f, "  Meterset:       {}", meterset)?,
                None => writeln!(f, "  Meterset:       unknown")?,
            }
            if let Some(gantry) = beam.fixed_gantry_state() {
                writeln!(
                    f,
                    "  Gantry:         {} ({})",
                    gantry.angle, gantry.rotation_direction
                )?;
            }
            writeln!(f, "  Control Points: {}", beam.control_points.len())?;

            match Segments::for_beam(index, beam) {
                Ok(segments) => {
                    let numbers: Vec<String> = segments
                        .segment_numbers()
                        .iter()
                        .map(|n| n.to_string())
                        .collect();
                    writeln!(f, "  Segments:       {}", numbers.join(", "))?;
                }
                Err(_) => writeln!(f, "  Segments:       none")?,
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Beam, ControlPoint, DevicePositionRecord, DeviceType};

    fn plan() -> Plan {
        let delivered = |index| ControlPoint {
            index,
            device_positions: Some(vec![DevicePositionRecord::new(
                DeviceType::AsymX,
                vec![-10.0, 10.0],
            )]),
            ..Default::default()
        };
        let setup = ControlPoint {
            gantry_angle: Some(180.0),
            gantry_rotation: Some("NONE".to_string()),
            ..Default::default()
        };

        Plan {
            patient_id: Some("PAT-001".to_string()),
            plan_name: Some("Prostate".to_string()),
            plan_label: None,
            beams: vec![
                Beam::new(
                    Some(1),
                    Some("AP".to_string()),
                    None,
                    vec![setup, delivered(1), delivered(2), delivered(3)],
                ),
                Beam::new(Some(2), None, None, vec![ControlPoint::default()]),
            ],
            beam_metersets: vec![Some(98.5)],
        }
    }

    #[test]
    fn test_report_contents() {
        let plan = plan();
        let output = PlanReport::new(&plan).to_string();

        assert!(output.contains("Patient ID:     PAT-001"));
        assert!(output.contains("Plan Label:     unknown"));
        assert!(output.contains("Beams:          2"));
        assert!(output.contains("  Name:           AP"));
        assert!(output.contains("  Meterset:       98.5"));
        assert!(output.contains("  Gantry:         180 (NONE)"));
        assert!(output.contains("  Segments:       1, 2"));
    }

    #[test]
    fn test_report_beam_without_segments() {
        let plan = plan();
        let output = PlanReport::new(&plan).to_string();
        let second = output.split("Beam 2").nth(1).unwrap();

        assert!(second.contains("  Meterset:       unknown"));
        assert!(second.contains("  Segments:       none"));
    }
}
