//! Court discovery report.
//!
//! Compares live court names from the resource listings against the static
//! fallback table and prints a corrected table snippet for any drift.

use chrono::{SecondsFormat, Utc};
use futures::future::join_all;
use serde::Serialize;
use std::collections::HashMap;
use tracing::{info, instrument};

use crate::data_fetcher::SlotAggregator;
use crate::data_fetcher::court_names::{fallback_name, short_key};
use crate::data_fetcher::models::{Region, Resource, Tenant};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CourtStatus {
    Ok,
    Mismatch,
    MissingFromFallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SummaryStatus {
    AllOk,
    ActionRequired,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtReport {
    pub resource_id: String,
    pub api_name: String,
    pub fallback_name: Option<String>,
    pub resolved_name: String,
    pub status: CourtStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubReport {
    pub club: String,
    pub location: Region,
    pub tenant_id: String,
    pub court_count: usize,
    pub courts: Vec<CourtReport>,
    pub status: CourtStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportSummary {
    pub total_tenants: usize,
    pub tenants_with_issues: usize,
    pub status: SummaryStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourtDiscoveryReport {
    pub generated_at: String,
    pub summary: ReportSummary,
    pub reports: Vec<ClubReport>,
    pub corrected_snippet: String,
}

/// Builds one club's entry from its live resources and resolved names.
pub fn club_report(
    tenant: &Tenant,
    location: Region,
    resources: &[Resource],
    resolved: &HashMap<String, String>,
) -> ClubReport {
    let courts: Vec<CourtReport> = resources
        .iter()
        .map(|resource| {
            let api_name = resource.name.trim().to_string();
            let fallback = fallback_name(&tenant.id, &resource.id);
            let status = match fallback {
                None => CourtStatus::MissingFromFallback,
                Some(name) if name == api_name => CourtStatus::Ok,
                Some(_) => CourtStatus::Mismatch,
            };
            CourtReport {
                resource_id: resource.id.clone(),
                resolved_name: resolved
                    .get(&resource.id)
                    .cloned()
                    .unwrap_or_else(|| api_name.clone()),
                api_name,
                fallback_name: fallback.map(str::to_string),
                status,
            }
        })
        .collect();

    let status = if courts.iter().all(|c| c.status == CourtStatus::Ok) {
        CourtStatus::Ok
    } else if courts.iter().any(|c| c.status == CourtStatus::Mismatch) {
        CourtStatus::Mismatch
    } else {
        CourtStatus::MissingFromFallback
    };

    ClubReport {
        club: tenant.name.clone(),
        location,
        tenant_id: tenant.id.clone(),
        court_count: resources.len(),
        courts,
        status,
    }
}

impl CourtDiscoveryReport {
    pub fn from_reports(reports: Vec<ClubReport>) -> Self {
        let issues: Vec<&ClubReport> = reports
            .iter()
            .filter(|report| report.status != CourtStatus::Ok)
            .collect();

        let corrected_snippet = corrected_snippet(&issues);
        let summary = ReportSummary {
            total_tenants: reports.len(),
            tenants_with_issues: issues.len(),
            status: if issues.is_empty() {
                SummaryStatus::AllOk
            } else {
                SummaryStatus::ActionRequired
            },
        };

        Self {
            generated_at: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
            summary,
            reports,
            corrected_snippet,
        }
    }
}

fn corrected_snippet(issues: &[&ClubReport]) -> String {
    if issues.is_empty() {
        return "// All fallback entries match the API, nothing to update!".to_string();
    }

    let mut lines = Vec::new();
    for report in issues {
        let tenant_key = short_key(&report.tenant_id);
        lines.push(format!("  // {} ({tenant_key})", report.club));
        for court in &report.courts {
            lines.push(format!(
                "  \"{tenant_key}::{}\": \"{}\",",
                short_key(&court.resource_id),
                court.api_name
            ));
        }
        lines.push(String::new());
    }
    lines.join("\n")
}

/// Fetches every club's live courts and compares them with the fallback table.
#[instrument(skip(aggregator))]
pub async fn discover_courts(aggregator: &SlotAggregator) -> CourtDiscoveryReport {
    let tenants = aggregator.discover_tenants().await;
    let upstream = aggregator.upstream();
    let court_names = aggregator.court_names();

    let reports = join_all(tenants.iter().filter_map(|discovered| {
        let location = discovered.assigned_region()?;
        let tenant = &discovered.tenant;
        Some(async move {
            let resources = upstream.fetch_resources(&tenant.id).await;
            court_names
                .set_names(
                    &tenant.id,
                    resources.iter().map(|r| (r.id.as_str(), r.name.as_str())),
                )
                .await;
            let resolved = court_names
                .resolve_many(&tenant.id, resources.iter().map(|r| r.id.as_str()))
                .await;
            club_report(tenant, location, &resources, &resolved)
        })
    }))
    .await;

    let report = CourtDiscoveryReport::from_reports(reports);
    info!(
        "Court discovery: {} clubs, {} with issues",
        report.summary.total_tenants, report.summary.tenants_with_issues
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn tenant(id: &str, name: &str) -> Tenant {
        Tenant {
            id: id.to_string(),
            name: name.to_string(),
            slug: None,
            coordinate: None,
        }
    }

    fn resource(id: &str, name: &str) -> Resource {
        Resource {
            id: id.to_string(),
            name: name.to_string(),
        }
    }

    fn resolved(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(id, name)| (id.to_string(), name.to_string()))
            .collect()
    }

    #[test]
    fn test_club_report_statuses() {
        let bam_bam = tenant("9a18884f-0000-0000-0000-000000000000", "Bam Bam Padel Ubud");
        let resources = vec![
            resource("a7c47627-1111", " Bandeja Court "),
            resource("78c071c3-2222", "Golden Point"),
        ];

        let report = club_report(
            &bam_bam,
            Region::Ubud,
            &resources,
            &resolved(&[("a7c47627-1111", "Bandeja Court")]),
        );

        assert_eq!(report.court_count, 2);
        assert_eq!(report.courts[0].status, CourtStatus::Ok);
        assert_eq!(report.courts[0].api_name, "Bandeja Court");
        assert_eq!(report.courts[1].status, CourtStatus::Mismatch);
        assert_eq!(
            report.courts[1].fallback_name.as_deref(),
            Some("Golden Point Court")
        );
        assert_eq!(report.status, CourtStatus::Mismatch);
    }

    #[test]
    fn test_club_report_missing_from_fallback() {
        let unknown = tenant("ffffffff-1234", "New Club");
        let report = club_report(
            &unknown,
            Region::Sanur,
            &[resource("0123abcd-9", "Court A")],
            &HashMap::new(),
        );
        assert_eq!(report.status, CourtStatus::MissingFromFallback);
        assert_eq!(report.courts[0].resolved_name, "Court A");
        assert_eq!(report.courts[0].fallback_name, None);
    }

    #[test]
    fn test_report_summary_and_snippet() {
        let ok = club_report(&tenant("aaaaaaaa", "Empty Club"), Region::Ubud, &[], &HashMap::new());
        let issue = club_report(
            &tenant("ffffffff-1234", "New Club"),
            Region::Sanur,
            &[resource("0123abcd-9", "Court A")],
            &HashMap::new(),
        );

        let report = CourtDiscoveryReport::from_reports(vec![ok.clone(), issue]);
        assert_eq!(report.summary.total_tenants, 2);
        assert_eq!(report.summary.tenants_with_issues, 1);
        assert_eq!(report.summary.status, SummaryStatus::ActionRequired);
        assert!(report.corrected_snippet.contains("// New Club (ffffffff)"));
        assert!(report.corrected_snippet.contains("\"ffffffff::0123abcd\": \"Court A\","));

        let clean = CourtDiscoveryReport::from_reports(vec![ok]);
        assert_eq!(clean.summary.status, SummaryStatus::AllOk);
        assert!(clean.corrected_snippet.contains("nothing to update"));
    }

    #[test]
    fn test_report_serializes_camel_case() {
        let report = CourtDiscoveryReport::from_reports(vec![]);
        let value = serde_json::to_value(&report).unwrap();
        assert_eq!(
            value["summary"],
            json!({"totalTenants": 0, "tenantsWithIssues": 0, "status": "ALL_OK"})
        );
        assert!(value["generatedAt"].as_str().unwrap().ends_with('Z'));

        let status = serde_json::to_value(CourtStatus::MissingFromFallback).unwrap();
        assert_eq!(status, json!("MISSING_FROM_FALLBACK"));
    }
}
