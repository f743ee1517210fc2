//! Check operation - run every unit without writing.

use stencil_manifest::StencilToml;

use super::units::run_units;
use crate::reports::{CheckReport, UnitFailure, UnitStatus};

/// Execute the check operation.
pub fn check(file: &StencilToml) -> CheckReport {
    let mut units = Vec::new();
    let mut failures = Vec::new();

    for outcome in run_units(file) {
        match &outcome.result {
            Ok(source) => units.push(UnitStatus {
                type_name: outcome.type_name,
                template: outcome.template,
                hint_name: outcome.hint_name,
                lines: source.content.lines().count(),
            }),
            Err(report) => {
                failures.push(UnitFailure::new(&outcome.type_name, &outcome.hint_name, report))
            }
        }
    }

    CheckReport {
        config_path: file.path().to_path_buf(),
        units,
        failures,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        ops::units::fixtures,
        reports::{BufferOutput, Report},
    };

    #[test]
    fn test_check_reports_each_unit() {
        let (_temp, file) = fixtures::project();

        let report = check(&file);

        assert!(!report.is_valid());
        assert_eq!(report.units.len(), 2);
        assert_eq!(report.units[0].hint_name, "Shop.Orders.OrderId.g");
        assert_eq!(report.units[0].lines, 7);
        assert_eq!(report.failures[0].type_name, "Faulty");

        let mut out = BufferOutput::default();
        report.render(&mut out);
        assert_eq!(out.stdout.first().map(String::as_str), Some("3 units:"));
        assert_eq!(
            out.stdout.last().map(String::as_str),
            Some("✗ 1 of 3 units failed")
        );
    }

    #[test]
    fn test_check_json_omits_rendered_diagnostics() {
        let (_temp, file) = fixtures::project();

        let json = serde_json::to_value(check(&file)).unwrap();

        assert_eq!(json["units"].as_array().unwrap().len(), 2);
        let failure = &json["failures"][0];
        assert_eq!(failure["hint_name"], "Shop.Faulty.g");
        assert!(failure.get("rendered").is_none());
        assert!(
            failure["message"]
                .as_str()
                .unwrap()
                .starts_with("missing closing #endif")
        );
    }
}
