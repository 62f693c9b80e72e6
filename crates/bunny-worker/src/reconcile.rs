//! Completion reconciliation.
//!
//! Pure correlation of a provider completion notification with the full
//! per-output job detail: per-output status mapping, policy back-resolution,
//! staging-to-final key promotion planning and job-level status aggregation.
//! All object-store side effects are returned as a promotion plan for the
//! caller to execute; nothing here touches the network.

use thiserror::Error;
use tracing::debug;

use bunny_models::{
    encode_outputs, final_key, CompletionNotification, KeyError, MetadataError, OutputStatus,
    PolicyMap, PresetCatalog, ResultOutput, ResultParams, ResultStatus,
};
use bunny_transcoder::JobDetail;

#[derive(Debug, Error)]
pub enum ReconcileError {
    /// The provider reported an output key this pipeline never requested.
    #[error("No job detail for notified output key {0}")]
    MissingDetail(String),

    #[error(transparent)]
    Metadata(#[from] MetadataError),

    #[error(transparent)]
    Key(#[from] KeyError),
}

/// One staging-to-final object move to perform for a successful output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Promotion {
    pub from: String,
    pub to: String,
}

/// Outcome of reconciling one completion notification.
#[derive(Debug, Clone)]
pub struct Reconciliation {
    /// Normalized result params, outputs already packed
    pub params: ResultParams,
    /// Per-output results in notification order
    pub outputs: Vec<ResultOutput>,
    /// Moves to execute before publishing the result
    pub promotions: Vec<Promotion>,
}

impl Reconciliation {
    pub fn status(&self) -> ResultStatus {
        self.params.status
    }
}

/// Reconcile a completion notification against full job detail.
///
/// Every notified output must have a matching detail entry keyed by its
/// staging key; a miss means the provider produced a key the pipeline never
/// requested and fails the whole notification. A provider status of
/// `Complete` marks an output as success and schedules its promotion; any
/// other status is an error and leaves the destination empty. Output order
/// follows the notification.
pub fn reconcile(
    notification: &CompletionNotification,
    detail: &JobDetail,
    catalog: &PresetCatalog,
    policies: &PolicyMap,
    now_millis: i64,
) -> Result<Reconciliation, ReconcileError> {
    let details = detail.outputs_by_key();

    let mut outputs = Vec::with_capacity(notification.outputs.len());
    let mut promotions = Vec::new();
    let mut success_count = 0;
    let mut error_count = 0;

    for notified in &notification.outputs {
        let output_detail = details
            .get(notified.key.as_str())
            .ok_or_else(|| ReconcileError::MissingDetail(notified.key.clone()))?;

        let transcode_policy = catalog.policy_for_preset_id(policies, &notified.preset_id);

        let (destination, status) = if notified.is_complete() {
            let destination = final_key(&notified.key)?;
            promotions.push(Promotion {
                from: notified.key.clone(),
                to: destination.clone(),
            });
            success_count += 1;
            (destination, OutputStatus::Success)
        } else {
            error_count += 1;
            (String::new(), OutputStatus::Error)
        };

        outputs.push(ResultOutput {
            destination,
            transcode_policy,
            status,
            detail: output_detail.status_detail.clone(),
            size: output_detail.file_size,
            duration: output_detail.duration_millis,
            width: output_detail.width,
            height: output_detail.height,
        });
    }

    let status = ResultStatus::aggregate(success_count, error_count);
    let clock_time = now_millis - notification.user_metadata.start_time_millis()?;

    debug!(
        "Reconciled job {}: {} ({} ok, {} failed)",
        notification.job_id, status, success_count, error_count
    );

    let params = ResultParams {
        job_id: notification.user_metadata.job_id.clone(),
        et_job_id: notification.job_id.clone(),
        dlcs_id: notification.user_metadata.dlcs_id.clone(),
        status,
        clock_time,
        source: notification.input.key.clone(),
        outputs: encode_outputs(&outputs),
    };

    Ok(Reconciliation {
        params,
        outputs,
        promotions,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use bunny_models::{JobMetadata, NotifiedInput, NotifiedOutput};
    use bunny_transcoder::OutputDetail;

    const START: i64 = 1_700_000_000_000;

    fn policies() -> PolicyMap {
        PolicyMap::from_json(r#"{"Welcome Standard MP4": "System preset: Web"}"#).unwrap()
    }

    fn catalog() -> PresetCatalog {
        PresetCatalog::from_entries(vec![
            ("System preset: Web".to_string(), "p-web".to_string()),
            ("Wellcome WebM".to_string(), "p-webm".to_string()),
        ])
    }

    fn notified(key: &str, preset_id: &str, status: &str) -> NotifiedOutput {
        serde_json::from_value(serde_json::json!({
            "key": key,
            "presetId": preset_id,
            "status": status,
        }))
        .unwrap()
    }

    fn detail_for(key: &str, status: &str) -> OutputDetail {
        OutputDetail {
            key: key.to_string(),
            preset_id: None,
            status: Some(status.to_string()),
            status_detail: if status == "Complete" {
                None
            } else {
                Some("3001 Invalid input".to_string())
            },
            file_size: Some(2048),
            duration_millis: Some(9000),
            width: Some(640),
            height: Some(360),
        }
    }

    fn notification(outputs: Vec<NotifiedOutput>) -> CompletionNotification {
        CompletionNotification {
            job_id: "1111111111111-aaaaaa".into(),
            user_metadata: JobMetadata::new("job-1", "7/3/ae32f1b2", START),
            input: NotifiedInput {
                key: "sample.mp4".into(),
            },
            outputs,
        }
    }

    fn job_detail(outputs: Vec<OutputDetail>) -> JobDetail {
        JobDetail {
            id: "1111111111111-aaaaaa".into(),
            outputs,
        }
    }

    #[test]
    fn test_all_complete_is_success_with_promotions() {
        let notification = notification(vec![
            notified("x/0001/videos/mp4/a.mp4", "p-web", "Complete"),
            notified("x/0002/videos/webm/a.webm", "p-webm", "Complete"),
        ]);
        let detail = job_detail(vec![
            detail_for("x/0001/videos/mp4/a.mp4", "Complete"),
            detail_for("x/0002/videos/webm/a.webm", "Complete"),
        ]);

        let outcome =
            reconcile(&notification, &detail, &catalog(), &policies(), START + 5000).unwrap();

        assert_eq!(outcome.status(), ResultStatus::Success);
        assert_eq!(
            outcome.promotions,
            vec![
                Promotion {
                    from: "x/0001/videos/mp4/a.mp4".into(),
                    to: "videos/mp4/a.mp4".into()
                },
                Promotion {
                    from: "x/0002/videos/webm/a.webm".into(),
                    to: "videos/webm/a.webm".into()
                },
            ]
        );
        assert!(outcome.outputs.iter().all(|o| o.status.is_success()));
        assert_eq!(outcome.outputs[0].destination, "videos/mp4/a.mp4");
    }

    #[test]
    fn test_mixed_outcome_is_partial() {
        let notification = notification(vec![
            notified("x/0001/videos/mp4/a.mp4", "p-web", "Complete"),
            notified("x/0002/videos/webm/a.webm", "p-webm", "Error"),
        ]);
        let detail = job_detail(vec![
            detail_for("x/0001/videos/mp4/a.mp4", "Complete"),
            detail_for("x/0002/videos/webm/a.webm", "Error"),
        ]);

        let outcome =
            reconcile(&notification, &detail, &catalog(), &policies(), START + 5000).unwrap();

        assert_eq!(outcome.status(), ResultStatus::Partial);
        assert_eq!(outcome.promotions.len(), 1);
        assert_eq!(outcome.outputs[1].destination, "");
        assert_eq!(outcome.outputs[1].status, OutputStatus::Error);
        assert_eq!(
            outcome.outputs[1].detail.as_deref(),
            Some("3001 Invalid input")
        );
    }

    #[test]
    fn test_all_errors_is_none_with_no_promotions() {
        let notification = notification(vec![
            notified("x/0001/videos/mp4/a.mp4", "p-web", "Error"),
            notified("x/0002/videos/webm/a.webm", "p-webm", "Error"),
        ]);
        let detail = job_detail(vec![
            detail_for("x/0001/videos/mp4/a.mp4", "Error"),
            detail_for("x/0002/videos/webm/a.webm", "Error"),
        ]);

        let outcome =
            reconcile(&notification, &detail, &catalog(), &policies(), START + 5000).unwrap();

        assert_eq!(outcome.status(), ResultStatus::None);
        assert!(outcome.promotions.is_empty());
    }

    #[test]
    fn test_missing_detail_is_protocol_violation() {
        let notification =
            notification(vec![notified("x/0001/videos/mp4/a.mp4", "p-web", "Complete")]);
        let detail = job_detail(vec![]);

        let err = reconcile(&notification, &detail, &catalog(), &policies(), START)
            .unwrap_err();
        assert!(matches!(err, ReconcileError::MissingDetail(ref key)
            if key == "x/0001/videos/mp4/a.mp4"));
    }

    #[test]
    fn test_policy_back_resolution() {
        let notification = notification(vec![
            notified("x/0001/videos/mp4/a.mp4", "p-web", "Complete"),
            notified("x/0002/videos/webm/a.webm", "p-webm", "Complete"),
            notified("x/0003/videos/other/a.mov", "p-unknown", "Complete"),
        ]);
        let detail = job_detail(vec![
            detail_for("x/0001/videos/mp4/a.mp4", "Complete"),
            detail_for("x/0002/videos/webm/a.webm", "Complete"),
            detail_for("x/0003/videos/other/a.mov", "Complete"),
        ]);

        let outcome =
            reconcile(&notification, &detail, &catalog(), &policies(), START).unwrap();

        // Aliased preset resolves back to the policy name
        assert_eq!(
            outcome.outputs[0].transcode_policy.as_deref(),
            Some("Welcome Standard MP4")
        );
        // Unaliased preset falls back to the preset name
        assert_eq!(
            outcome.outputs[1].transcode_policy.as_deref(),
            Some("Wellcome WebM")
        );
        // Preset id not in the catalog yields no policy
        assert_eq!(outcome.outputs[2].transcode_policy, None);
    }

    #[test]
    fn test_clock_time_and_correlation_ids() {
        let notification =
            notification(vec![notified("x/0001/videos/mp4/a.mp4", "p-web", "Complete")]);
        let detail = job_detail(vec![detail_for("x/0001/videos/mp4/a.mp4", "Complete")]);

        let outcome =
            reconcile(&notification, &detail, &catalog(), &policies(), START + 5000).unwrap();

        assert_eq!(outcome.params.clock_time, 5000);
        assert_eq!(outcome.params.job_id, "job-1");
        assert_eq!(outcome.params.dlcs_id, "7/3/ae32f1b2");
        assert_eq!(outcome.params.et_job_id, "1111111111111-aaaaaa");
        assert_eq!(outcome.params.source, "sample.mp4");
    }

    #[test]
    fn test_output_order_follows_notification() {
        let keys = [
            "x/0001/videos/c.mp4",
            "x/0001/videos/a.mp4",
            "x/0001/videos/b.mp4",
        ];
        let notification = notification(
            keys.iter()
                .map(|k| notified(k, "p-web", "Complete"))
                .collect(),
        );
        let detail = job_detail(keys.iter().map(|k| detail_for(k, "Complete")).collect());

        let outcome =
            reconcile(&notification, &detail, &catalog(), &policies(), START).unwrap();

        let destinations: Vec<_> = outcome
            .outputs
            .iter()
            .map(|o| o.destination.as_str())
            .collect();
        assert_eq!(
            destinations,
            vec!["videos/c.mp4", "videos/a.mp4", "videos/b.mp4"]
        );
    }
}
