use crate::compositor::Compositor;
use crate::error::LayoutError;
use crate::error::Result;
use crate::layout::LayoutMapping;
use crate::parser::MonitorDescriptor;
use crate::parser::parse_monitors;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppliedMonitor {
    pub name: String,
    pub model: String,
    pub config: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ApplyReport {
    /// Monitors configured (or, on a dry run, that would have been), in query order.
    pub applied: Vec<AppliedMonitor>,
    /// Names of monitors with no model or no layout entry.
    pub skipped: Vec<String>,
}

/// Match descriptors against the layout without touching the compositor.
pub fn plan_layout(monitors: &[MonitorDescriptor], layout: &LayoutMapping) -> ApplyReport {
    let mut report = ApplyReport::default();
    for monitor in monitors {
        let matched = monitor
            .model()
            .and_then(|model| layout.config_for(model).map(|config| (model, config)));
        match matched {
            Some((model, config)) => report.applied.push(AppliedMonitor {
                name: monitor.name.clone(),
                model: model.to_string(),
                config: config.to_string(),
            }),
            None => {
                tracing::debug!(monitor = %monitor.name, model = ?monitor.model(), "no layout entry");
                report.skipped.push(monitor.name.clone());
            }
        }
    }
    report
}

/// Query monitors, then configure every one whose model has a layout entry.
///
/// `announce` receives each configure command line before it runs. A failed
/// configure call stops the run; monitors already configured stay configured.
pub async fn apply_layout<C, F>(
    compositor: &C,
    layout: &LayoutMapping,
    dry_run: bool,
    mut announce: F,
) -> Result<ApplyReport>
where
    C: Compositor + ?Sized,
    F: FnMut(&str),
{
    let raw = compositor.query_monitors().await?;
    let monitors = parse_monitors(&raw);
    if monitors.is_empty() {
        return Err(LayoutError::NoMonitors);
    }
    tracing::info!(count = monitors.len(), "found monitors");

    let report = plan_layout(&monitors, layout);
    for monitor in &report.applied {
        announce(&compositor.describe_configure(&monitor.name, &monitor.config));
        if dry_run {
            continue;
        }
        compositor
            .configure_monitor(&monitor.name, &monitor.config)
            .await?;
    }
    Ok(report)
}
