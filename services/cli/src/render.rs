use crate::expansion::TreeExpansion;
use chrono::NaiveDateTime;
use nbs_discharge::workflows::screening::{
    report, ActivePath, DecisionTree, DischargeReport, NodeRef, ReferralDirectory,
    TransportProtocol,
};

pub(crate) fn render_report(report: &DischargeReport) -> String {
    let outcome = &report.outcome;
    let mut lines = vec![
        "NBS discharge decision".to_string(),
        format!(
            "Inputs: {:.1} hours old, can delay: {}, wilayat: {}",
            report.inputs.age_hours,
            if report.inputs.can_delay { "yes" } else { "no" },
            report.inputs.wilayat().unwrap_or("not selected")
        ),
        String::new(),
        format!(
            "{} - {} [{}]",
            outcome.scenario, outcome.title, report.risk_label
        ),
        format!(
            "Sample readiness {}% | follow-up risk {}%",
            report.sample_readiness_percent, report.follow_up_risk_score
        ),
    ];

    match &outcome.deadline_label {
        Some(deadline) => lines.push(format!("{} ({deadline})", outcome.urgency_message)),
        None => lines.push(outcome.urgency_message.clone()),
    }

    lines.push(String::new());
    lines.push("Action steps".to_string());
    for (position, step) in outcome.steps.iter().enumerate() {
        let marker = if step.done {
            "✓".to_string()
        } else {
            (position + 1).to_string()
        };
        lines.push(format!("  {marker}. {}", step.text));
    }

    if let Some(referral) = &outcome.referral {
        lines.push(String::new());
        lines.push(format!("Referral destination: {}", referral.center));
        if let Some(note) = referral.note {
            lines.push(format!("  {note}"));
        }
        lines.push(format!("  Wilayat: {}", referral.label));
    }

    if let Some(deadline) = report.collection_deadline {
        lines.push(format!(
            "Required collection date: {}",
            deadline.format("%Y-%m-%d %H:%M")
        ));
    }

    if let Some(notice) = &report.focal_point {
        lines.push(String::new());
        lines.push(format!("! {}", notice.headline));
        lines.push(format!("  {}", notice.detail));
    }

    lines.join("\n")
}

/// Draws the tree top-down. Nodes on `active` are marked; children and
/// scenario actions only show for nodes open in `expansion`.
pub(crate) fn render_tree(
    tree: &DecisionTree,
    active: Option<&ActivePath>,
    expansion: &TreeExpansion,
) -> String {
    let mut lines = Vec::new();
    render_node(tree.root(), 0, active, expansion, &mut lines);
    lines.join("\n")
}

fn render_node(
    node: NodeRef<'_>,
    depth: usize,
    active: Option<&ActivePath>,
    expansion: &TreeExpansion,
    lines: &mut Vec<String>,
) {
    let indent = "  ".repeat(depth);
    let is_active = active.is_some_and(|path| path.contains(node.id()));
    let is_expanded = expansion.is_expanded(node.id());
    let marker = if is_active { "●" } else { "○" };

    let tag = match node {
        NodeRef::Branch(branch) => branch
            .condition
            .map(|condition| format!(" [{}]", condition.label().to_uppercase()))
            .unwrap_or_default(),
        NodeRef::Scenario(leaf) => format!(" [{}]", leaf.risk_level.label()),
        NodeRef::Referral(_) => String::new(),
    };

    let children = node.children();
    let fold = match (children.is_empty(), is_expanded) {
        (true, _) => "",
        (false, true) => " v",
        (false, false) => " >",
    };

    lines.push(format!(
        "{indent}{marker} {}{tag} - {}{fold}",
        node.label(),
        node.detail()
    ));

    if let NodeRef::Scenario(leaf) = node {
        if is_active && is_expanded {
            for (position, action) in leaf.actions.iter().enumerate() {
                lines.push(format!("{indent}    {}. {action}", position + 1));
            }
        }
    }

    if is_expanded {
        for child in children {
            render_node(child, depth + 1, active, expansion, lines);
        }
    }
}

pub(crate) fn render_directory(directory: &ReferralDirectory) -> String {
    let mut lines = vec!["Wilayat referral directory".to_string()];
    for region in directory.regions() {
        let note = region
            .entry
            .note
            .map(|note| format!(" ({note})"))
            .unwrap_or_default();
        lines.push(format!(
            "- {}: {} -> {}{note}",
            region.key, region.entry.label, region.entry.center
        ));
    }
    lines.join("\n")
}

pub(crate) fn render_transport(
    protocol: &TransportProtocol,
    next_dispatch: NaiveDateTime,
) -> String {
    let mut lines = vec!["Lab & transport protocol".to_string()];
    for step in &protocol.steps {
        let warning = step
            .warning
            .map(|warning| format!(" ({warning})"))
            .unwrap_or_default();
        lines.push(format!("- {}: {}{warning}", step.label, step.instruction));
    }
    lines.push(format!(
        "Next dispatch: {}",
        next_dispatch.format("%A %Y-%m-%d %H:%M")
    ));
    lines.join("\n")
}

pub(crate) fn render_cause_effect() -> String {
    let mut lines = vec!["Cause & effect summary".to_string()];
    for row in report::cause_effect_summary() {
        lines.push(format!("- {} -> {}", row.cause, row.effect));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use nbs_discharge::workflows::screening::{resolve_active_path, DischargeInputs, Scenario};

    #[test]
    fn report_lists_referral_and_focal_point() {
        let inputs = DischargeInputs::new(20.0, false, Some("sohar".to_string())).expect("valid");
        let rendered = render_report(&DischargeReport::standard(inputs));

        assert!(rendered.contains("Scenario C - Early Discharge — Outpatient Follow-up [HIGH RISK]"));
        assert!(rendered.contains("(28 hours remaining)"));
        assert!(rendered.contains("  3. Direct mother to Sohar Hospital (Return to Sohar Hospital)"));
        assert!(rendered.contains("Referral destination: Sohar Hospital"));
        assert!(rendered.contains("! Focal Point Activation Required"));
    }

    #[test]
    fn report_ticks_satisfied_steps() {
        let inputs = DischargeInputs::new(30.0, true, None).expect("valid");
        let rendered = render_report(&DischargeReport::standard(inputs));

        assert!(rendered.contains("  ✓. Collect NBS sample immediately"));
        assert!(!rendered.contains("Referral destination"));
        assert!(!rendered.contains("Focal Point"));
    }

    #[test]
    fn tree_marks_active_path_and_shows_actions() {
        let tree = DecisionTree::standard();
        let active = resolve_active_path(Scenario::C, Some("saham"));
        let rendered = render_tree(tree, Some(&active), &TreeExpansion::expand_all(tree));

        assert!(rendered.starts_with("● Baby Born"));
        assert!(rendered.contains("        ● Scenario C [HIGH RISK]"));
        assert!(rendered.contains("          ● Saham - Saham Hospital"));
        assert!(rendered.contains("          ○ Sohar - Sohar Hospital"));
        assert!(rendered.contains("    1. Provide NBS Card to mother"));
        assert!(!rendered.contains("1. Collect NBS sample"));
    }

    #[test]
    fn collapsed_tree_only_shows_root() {
        let tree = DecisionTree::standard();
        let rendered = render_tree(tree, None, &TreeExpansion::collapse_all(tree));

        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[0].ends_with(" v"));
        assert!(lines[1].ends_with(" >"));
        assert!(lines.iter().all(|line| !line.contains('●')));
    }

    #[test]
    fn directory_lists_every_region() {
        let rendered = render_directory(ReferralDirectory::north_batinah());
        assert!(rendered.contains("- saham: Saham -> Saham Hospital"));
        assert!(rendered.contains("- shinas_liwa: Shinas & Liwa -> Shinas Polyclinic (Delivery Suite)"));
    }
}
