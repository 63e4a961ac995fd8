use super::ReportFormatter;
use anyhow::Result;
use colored::*;
use gitfresh_core::SyncReport;
use serde_json::json;

/// Text formatter for interactive use
pub struct HumanFormatter {
    use_color: bool,
}

impl HumanFormatter {
    pub fn new(use_color: bool) -> Self {
        Self { use_color }
    }

    fn colorize(&self, text: &str, color: fn(&str) -> ColoredString) -> String {
        if self.use_color {
            color(text).to_string()
        } else {
            text.to_string()
        }
    }
}

impl ReportFormatter for HumanFormatter {
    fn format_report(&self, report: &SyncReport) -> Result<String> {
        let mut output = String::new();

        let headline = if report.synced() {
            self.colorize(&format!("✓ Contact {}", report.action), |s| s.green())
        } else {
            self.colorize(
                &format!("⚠ Contact {} but Freshdesk returned no record", report.action),
                |s| s.yellow(),
            )
        };
        output.push_str(&format!("{headline}\n"));

        output.push_str(&format!("  GitHub user: {}\n", report.handle));
        output.push_str(&format!("  Subdomain:   {}\n", report.tenant));

        if let Some(contact) = &report.contact {
            let id = self.colorize(&contact.id.to_string(), |s| s.cyan());
            output.push_str(&format!("  Contact ID:  {id}\n"));
        }

        match report.company_id {
            Some(company_id) => {
                let id = self.colorize(&company_id.to_string(), |s| s.cyan());
                output.push_str(&format!("  Company ID:  {id}\n"));
            }
            None => output.push_str("  Company:     none\n"),
        }

        Ok(output)
    }
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl ReportFormatter for JsonFormatter {
    fn format_report(&self, report: &SyncReport) -> Result<String> {
        let value = json!({
            "username": report.handle,
            "subdomain": report.tenant,
            "synced": report.synced(),
            "action": report.action,
            "contact_id": report.contact.as_ref().map(|c| c.id),
            "company_id": report.company_id,
        });

        if self.pretty {
            Ok(serde_json::to_string_pretty(&value)?)
        } else {
            Ok(serde_json::to_string(&value)?)
        }
    }
}

/// Prints only the boolean outcome
pub struct MinimalFormatter;

impl ReportFormatter for MinimalFormatter {
    fn format_report(&self, report: &SyncReport) -> Result<String> {
        Ok(report.synced().to_string())
    }
}
