//! Built-in storage engineering prompts.

use super::OutputFormat;

/// (id, English label, German label, output format, template)
pub(super) type Entry = (
    &'static str,
    &'static str,
    &'static str,
    OutputFormat,
    &'static str,
);

pub(super) const BUILTIN: &[Entry] = &[
    (
        "explain-issue",
        "Explain Issue and Error",
        "Problem/Fehler erklären",
        OutputFormat::Markdown,
        "Explain the following issue clearly for {vendor}.

Include:
- What happened (symptoms and timeline)
- Likely root cause(s)
- Immediate remediation steps
- Preventive best practices
- Validation checks after remediation

Issue details:
{user_input}
",
    ),
    (
        "runbook",
        "Generate Runbook",
        "Runbook generieren",
        OutputFormat::Markdown,
        "Create a detailed engineering runbook for the following task on {vendor}.

Include:
- Purpose and scope
- Preconditions and assumptions
- Step-by-step execution procedure
- Validation and success checks
- Rollback and recovery steps
- Risks and mitigation measures
Task:
{user_input}
",
    ),
    (
        "incident-rca",
        "Generate Incident RCA",
        "Incident RCA generieren",
        OutputFormat::Markdown,
        "Generate a professional incident Root Cause Analysis for {vendor}.
Include:
- Incident summary
- Timeline of events
- Technical root cause
- Business and technical impact
- Corrective actions taken
- Preventive actions and long-term improvements
- Lessons learned
Incident details:
{user_input}
",
    ),
    (
        "capacity-planning",
        "Capacity Planning",
        "Kapazitätsplanung",
        OutputFormat::Markdown,
        "Perform capacity planning analysis for {vendor}.
Include:
- Current capacity usage and utilization trends
- Growth assumptions and projections
- Performance and tiering considerations
- Capacity thresholds and risk points
- Procurement and expansion timeline
- High-level cost estimation
Requirements:
{user_input}
",
    ),
    (
        "performance-analysis",
        "Performance Analysis",
        "Performance-Analyse",
        OutputFormat::Markdown,
        "Analyze performance issues on {vendor}.
Include:
- Observed symptoms and affected workloads
- Key performance metrics to review
- Likely bottlenecks and constraints
- Recommended tuning and configuration changes
- Monitoring and alerting improvements
- Validation steps after optimization
Performance data:
{user_input}
",
    ),
    (
        "dr-test-planning",
        "DR Test Planning",
        "DR-Testplanung",
        OutputFormat::Markdown,
        "Create a Disaster Recovery test plan for {vendor}.
Include:
- Test objectives and success criteria
- Scope and systems included
- Detailed test procedures
- Roles and responsibilities
- Rollback and failback steps
- Evidence and documentation requirements
DR environment:
{user_input}
",
    ),
    (
        "storage-migration",
        "Storage Migration",
        "Storage-Migration",
        OutputFormat::Markdown,
        "Create a storage migration plan for {vendor} within the same vendor or platform family.
Include:
- Migration scope and objectives
- Pre-migration checks and prerequisites
- Migration strategy and approach
- Step-by-step migration procedure
- Data validation and consistency checks
- Post-migration activities
- Risks, mitigations, and rollback strategy
Migration details:
{user_input}
",
    ),
    (
        "ansible-playbook",
        "Generate Ansible Playbook",
        "Ansible Playbook generieren",
        OutputFormat::Yaml,
        "Generate a production-ready Ansible playbook for {vendor}.
Include:
- Variables and inputs required
- Clearly named and structured tasks
- Idempotent logic and error handling
- Use of appropriate vendor modules
- Comments explaining critical steps

Constraints:
- Follow Ansible best practices
- Do not include explanatory text outside YAML

User requirement:
{user_input}

Output:
- YAML playbook only
",
    ),
    (
        "change-request",
        "Generate Change Request Documentation",
        "Change Request Dokumentation generieren",
        OutputFormat::Markdown,
        "Create a professional, audit-ready Change Request (CR) document section for {vendor}.
Include:
- Change title and CR reference placeholder
- Business and technical justification
- Risk assessment and mitigation
- Detailed implementation steps
- Backout and recovery plan
- Impacted systems and outage window
- Required approvals (CAB, 4-eyes principle)
- Post-implementation validation steps
Change description:
{user_input}
",
    ),
    (
        "compliance-audit",
        "Storage Compliance & Audit Evidence",
        "Storage Compliance & Audit-Nachweise",
        OutputFormat::Markdown,
        "Act as a storage compliance specialist in a European global bank.
Generate audit-compliant documentation/explanation for the following storage-related audit topic on {vendor}.
Include:
- Relevant regulatory references (DORA, BaFin, ECB, GDPR)
- Current configuration/status explanation
- Evidence collection steps (commands/reports)
- Gap analysis (if any)
- Remediation recommendations
Audit question or topic:
{user_input}
",
    ),
    (
        "cross-vendor-migration",
        "Cross-Vendor Migration Plan",
        "Herstellerübergreifende Migration",
        OutputFormat::Markdown,
        "Create a detailed cross-vendor storage migration plan from current {vendor} to a different platform (NetApp ONTAP / Pure FlashArray / PowerMax).
- Current-state assessment and constraints
- Target platform recommendation and justification
- Compatibility and interoperability considerations
- Chosen migration strategy (host-based, replication, tools, etc.)
- High-level step-by-step migration workflow
- Data validation and cutover approach
- Rollback and fallback strategy
- Timeline, effort estimation, and risks

Migration context:
{user_input}
",
    ),
    (
        "decommissioning",
        "Decommissioning Procedure",
        "Decommissioning & Datenrückgabe Prozedur",
        OutputFormat::Markdown,
        "Create a secure, compliant decommissioning and data retirement procedure for {vendor} in a banking environment.

Include:
- Scope and assets involved
- Pre-decommissioning checks
- Data sanitization method and standards
- Validation and evidence for auditors
- Documentation and sign-off requirements
- Stakeholder notification steps

Decommissioning scope:
{user_input}
",
    ),
];
