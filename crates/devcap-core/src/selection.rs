use crate::capability::CapabilityResult;
use crate::model::Device;

/// Auto-advance to a single match, but never override an existing selection.
pub fn should_auto_select<T>(results: &[T], current_selection: Option<&str>) -> bool {
    results.len() == 1 && current_selection.is_none()
}

/// The device to select automatically for a capability lookup, if any.
pub fn auto_selected_device<'a>(
    results: &'a [CapabilityResult],
    current_selection: Option<&str>,
) -> Option<&'a Device> {
    if should_auto_select(results, current_selection) {
        results.first().map(|r| &r.device)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capability::SupportStatus;

    fn result(id: &str) -> CapabilityResult {
        CapabilityResult {
            device: Device {
                id: id.to_string(),
                vendor: "Acme".to_string(),
                model_num: id.to_uppercase(),
                market_name: None,
                release_date: "2022-05-01".to_string(),
            },
            software: Vec::new(),
            provider: None,
            support_status: SupportStatus::Global,
        }
    }

    #[test]
    fn test_single_result_without_selection() {
        assert!(should_auto_select(&[result("a")], None));
    }

    #[test]
    fn test_existing_selection_is_kept() {
        assert!(!should_auto_select(&[result("a")], Some("existing")));
    }

    #[test]
    fn test_multiple_or_no_results() {
        assert!(!should_auto_select(&[result("a"), result("b")], None));
        assert!(!should_auto_select::<CapabilityResult>(&[], None));
    }

    #[test]
    fn test_auto_selected_device() {
        let results = [result("only")];
        assert_eq!(auto_selected_device(&results, None).map(|d| d.id.as_str()), Some("only"));
        assert!(auto_selected_device(&results, Some("other")).is_none());
    }
}
