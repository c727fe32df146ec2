use pitwall_core::{MonitorViewModel, StatusIndicator};

/// Text lines describing the monitor. The app prints them when they change.
pub fn render(view: &MonitorViewModel) -> Vec<String> {
    let mut lines = Vec::new();

    let mut header = view.title.clone();
    if let Some(session_id) = view.session_id {
        header.push_str(&format!(" | session {session_id}"));
    }
    header.push_str(&format!(" | {}", view.import_type));
    lines.push(header);

    if let Some(import_id) = &view.import_id {
        lines.push(format!("Import {import_id}"));
    }

    lines.push(format!("Status: {}", view.indicator.label()));
    match &view.indicator {
        StatusIndicator::Succeeded {
            completion_time_ms: Some(ms),
        } => lines.push(format!("  finished in {}", format_duration_ms(*ms))),
        StatusIndicator::Failed {
            detail: Some(detail),
            ..
        } => lines.push(format!("  {detail}")),
        StatusIndicator::FetchFailed { detail, .. } if !detail.is_empty() => {
            lines.push(format!("  {detail}"))
        }
        _ => {}
    }

    if let Some(error) = &view.form.error {
        lines.push(format!("Error: {error}"));
    }

    lines
}

/// True when the monitor shows an end state and nothing further will arrive.
///
/// A ready form that still cannot be submitted counts as settled: nothing the
/// monitor does on its own will change it.
pub fn is_settled(view: &MonitorViewModel) -> bool {
    if view.polling || view.form.submitting {
        return false;
    }
    view.form.error.is_some()
        || (view.indicator == StatusIndicator::AwaitingSubmission && !view.form.can_submit)
        || matches!(
            view.indicator,
            StatusIndicator::ProbeFailed { .. }
                | StatusIndicator::Succeeded { .. }
                | StatusIndicator::Failed { .. }
                | StatusIndicator::Unknown { .. }
                | StatusIndicator::FetchFailed { .. }
        )
}

fn format_duration_ms(ms: u64) -> String {
    if ms < 1_000 {
        format!("{ms} ms")
    } else if ms < 60_000 {
        format!("{:.1} s", ms as f64 / 1_000.0)
    } else {
        format!("{}m {:02}s", ms / 60_000, (ms % 60_000) / 1_000)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pitwall_core::{FormView, ImportType, ProcessType};
    use pretty_assertions::assert_eq;

    fn view(indicator: StatusIndicator) -> MonitorViewModel {
        MonitorViewModel {
            session_id: Some(42),
            title: "Import Results".to_string(),
            mode: Some(ProcessType::Results),
            import_type: ImportType::Wec,
            indicator,
            ..MonitorViewModel::default()
        }
    }

    #[test]
    fn waiting_job_shows_id_and_label() {
        let mut v = view(StatusIndicator::WaitingToBegin);
        v.import_id = Some("17".to_string());
        v.polling = true;

        assert_eq!(
            render(&v),
            vec![
                "Import Results | session 42 | WEC".to_string(),
                "Import 17".to_string(),
                "Status: Waiting to begin".to_string(),
            ]
        );
        assert!(!is_settled(&v));
    }

    #[test]
    fn failure_detail_is_shown() {
        let v = view(StatusIndicator::Failed {
            status: "FAILED".to_string(),
            detail: Some("parse error on line 3".to_string()),
        });
        let lines = render(&v);
        assert_eq!(lines[1], "Status: Import failed");
        assert_eq!(lines[2], "  parse error on line 3");
        assert!(is_settled(&v));
    }

    #[test]
    fn completion_time_is_formatted() {
        let v = view(StatusIndicator::Succeeded {
            completion_time_ms: Some(2_400),
        });
        assert_eq!(render(&v)[2], "  finished in 2.4 s");
        assert_eq!(format_duration_ms(250), "250 ms");
        assert_eq!(format_duration_ms(125_000), "2m 05s");
    }

    #[test]
    fn submission_error_settles_the_monitor() {
        let mut v = view(StatusIndicator::AwaitingSubmission);
        v.form = FormView {
            can_submit: true,
            submitting: false,
            error: Some("something went wrong".to_string()),
        };
        assert_eq!(render(&v).last().unwrap(), "Error: something went wrong");
        assert!(is_settled(&v));
    }

    #[test]
    fn checking_session_is_not_settled() {
        assert!(!is_settled(&view(StatusIndicator::CheckingSession)));
        assert!(!is_settled(&view(StatusIndicator::Submitting)));
    }

    #[test]
    fn unsubmittable_ready_form_is_settled() {
        let mut v = view(StatusIndicator::AwaitingSubmission);
        assert!(is_settled(&v));

        v.form.can_submit = true;
        assert!(!is_settled(&v));
    }
}
