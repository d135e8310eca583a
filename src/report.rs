//! Report rendering

use crate::inspect::{ImageInspector, OsLabel};
use crate::k8s::ContainerImageRecord;
use std::io::{self, Write};

pub const BANNER: &str = "Discovering pods and inspecting container images...";

/// Counts for a finished report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReportSummary {
    pub containers: usize,
    pub errors: usize,
    pub unknown: usize,
}

pub fn write_banner<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", BANNER)
}

pub fn format_line(record: &ContainerImageRecord, label: &OsLabel) -> String {
    format!(
        "Namespace: {}, Pod: {}, Image: {}, Base OS: {}",
        record.namespace, record.pod_name, record.image, label
    )
}

/// Inspect each record in order and write one line per record.
///
/// Inspection failures show up as `error` lines and never stop the loop. Only
/// a failure to write to `out` ends the report early.
pub fn write_report<I, W>(
    records: &[ContainerImageRecord],
    inspector: &I,
    out: &mut W,
) -> io::Result<ReportSummary>
where
    I: ImageInspector + ?Sized,
    W: Write,
{
    let mut summary = ReportSummary::default();

    for record in records {
        let label = inspector.inspect(&record.image);

        match label {
            OsLabel::Error => summary.errors += 1,
            OsLabel::Unknown => summary.unknown += 1,
            OsLabel::Os(_) => {}
        }
        summary.containers += 1;

        writeln!(out, "{}", format_line(record, &label))?;
        out.flush()?;
    }

    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::k8s::pods::tests::{StaticLister, pod};
    use crate::k8s::pods::{enumerate, flatten_pods};
    use std::cell::RefCell;
    use std::collections::HashMap;

    /// Inspector answering from a table; unlisted images are errors
    struct FakeInspector {
        labels: HashMap<String, OsLabel>,
        seen: RefCell<Vec<String>>,
    }

    impl FakeInspector {
        fn new(entries: &[(&str, OsLabel)]) -> Self {
            Self {
                labels: entries
                    .iter()
                    .map(|(image, label)| (image.to_string(), label.clone()))
                    .collect(),
                seen: RefCell::new(Vec::new()),
            }
        }
    }

    impl ImageInspector for FakeInspector {
        fn inspect(&self, image: &str) -> OsLabel {
            self.seen.borrow_mut().push(image.to_string());
            self.labels.get(image).cloned().unwrap_or(OsLabel::Error)
        }
    }

    fn render(records: &[ContainerImageRecord], inspector: &FakeInspector) -> (String, ReportSummary) {
        let mut out = Vec::new();
        write_banner(&mut out).unwrap();
        let summary = write_report(records, inspector, &mut out).unwrap();
        (String::from_utf8(out).unwrap(), summary)
    }

    #[test]
    fn test_line_format() {
        let record = ContainerImageRecord {
            namespace: "default".to_string(),
            pod_name: "web-1".to_string(),
            image: "nginx:1.25".to_string(),
        };
        assert_eq!(
            format_line(&record, &OsLabel::Os("linux".to_string())),
            "Namespace: default, Pod: web-1, Image: nginx:1.25, Base OS: linux"
        );
    }

    #[test]
    fn test_failed_inspection_does_not_abort() {
        let records = flatten_pods(&[pod("default", "web-1", &["nginx:1.25", "busybox:1.36"])]);
        let inspector = FakeInspector::new(&[("nginx:1.25", OsLabel::Os("linux".to_string()))]);

        let (output, summary) = render(&records, &inspector);
        let lines: Vec<&str> = output.lines().collect();

        assert_eq!(
            lines,
            vec![
                BANNER,
                "Namespace: default, Pod: web-1, Image: nginx:1.25, Base OS: linux",
                "Namespace: default, Pod: web-1, Image: busybox:1.36, Base OS: error",
            ]
        );
        assert_eq!(
            summary,
            ReportSummary {
                containers: 2,
                errors: 1,
                unknown: 0,
            }
        );
    }

    #[test]
    fn test_empty_cluster_prints_only_banner() {
        let records = tokio_test::block_on(enumerate(&StaticLister(Ok(Vec::new())))).unwrap();
        let inspector = FakeInspector::new(&[]);

        let (output, summary) = render(&records, &inspector);

        assert_eq!(output, format!("{}\n", BANNER));
        assert_eq!(summary, ReportSummary::default());
        assert!(inspector.seen.borrow().is_empty());
    }

    #[test]
    fn test_duplicate_images_inspected_per_container() {
        let records = flatten_pods(&[
            pod("a", "one", &["alpine:3.20"]),
            pod("b", "two", &["alpine:3.20"]),
        ]);
        let inspector = FakeInspector::new(&[("alpine:3.20", OsLabel::Unknown)]);

        let (output, summary) = render(&records, &inspector);

        assert_eq!(inspector.seen.borrow().len(), 2);
        assert_eq!(summary.unknown, 2);
        assert!(output.lines().nth(1).unwrap().starts_with("Namespace: a, Pod: one"));
        assert!(output.lines().nth(2).unwrap().starts_with("Namespace: b, Pod: two"));
    }

    #[test]
    fn test_end_to_end_with_tool_output() {
        use crate::inspect::{CraneInspector, ToolCommand, ToolOutput, ToolRunner};

        // nginx succeeds, busybox exits 1, "garbage" prints non-JSON
        struct ScriptedRunner;

        impl ToolRunner for ScriptedRunner {
            fn run(&self, _program: &str, args: &[String]) -> std::io::Result<ToolOutput> {
                let image = args.last().map(String::as_str).unwrap_or_default();
                let (success, stdout) = match image {
                    "nginx:1.25" => (true, r#"{"os":"linux"}"#),
                    "garbage:1" => (true, "not-json"),
                    _ => (false, ""),
                };
                Ok(ToolOutput {
                    success,
                    status: if success { "exit status: 0" } else { "exit status: 1" }.to_string(),
                    stdout: stdout.as_bytes().to_vec(),
                    stderr: if success { Vec::new() } else { b"not found".to_vec() },
                })
            }
        }

        let pods = vec![
            pod("default", "web-1", &["nginx:1.25", "busybox:1.36"]),
            pod("tools", "junk", &["garbage:1"]),
        ];
        let records = tokio_test::block_on(enumerate(&StaticLister(Ok(pods)))).unwrap();
        let inspector = CraneInspector::with_runner(ToolCommand::default(), ScriptedRunner);

        let mut out = Vec::new();
        let summary = write_report(&records, &inspector, &mut out).unwrap();
        let output = String::from_utf8(out).unwrap();

        assert_eq!(summary.containers, 3);
        assert_eq!(summary.errors, 2);
        assert!(output.contains("Image: nginx:1.25, Base OS: linux"));
        assert!(output.contains("Image: busybox:1.36, Base OS: error"));
        assert!(output.contains("Image: garbage:1, Base OS: error"));
    }
}
