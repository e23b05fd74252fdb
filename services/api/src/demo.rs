use crate::infra::{InMemorySnapshotStore, JsonFileSnapshotStore, RecordingSignatureNotifier};
use chrono::Utc;
use clap::Args;
use std::path::PathBuf;
use std::sync::Arc;

use hireline::error::AppError;
use hireline::workflows::recruitment::{
    Availability, Candidate, CandidateDraft, CandidateId, Check, CheckStatus, EvidenceUpload,
    OfferLetterTemplate, PipelineStage, Readiness, RecruitmentService, SnapshotStore,
    SystemReference,
};

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Optional JSON snapshot to hydrate the roster instead of the built-in seed
    #[arg(long)]
    pub(crate) snapshot: Option<PathBuf>,
    /// Company name substituted into the demo offer letter
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Salary line substituted into the demo offer letter
    #[arg(long)]
    pub(crate) salary: Option<String>,
    /// Skip the offer letter and signature portion of the demo
    #[arg(long)]
    pub(crate) skip_offer: bool,
}

#[derive(Args, Debug)]
pub(crate) struct OfferLetterArgs {
    /// Candidate name as it should appear in the letter
    #[arg(long)]
    pub(crate) name: String,
    /// Position offered
    #[arg(long)]
    pub(crate) role: String,
    /// Company name (defaults to the template placeholder)
    #[arg(long)]
    pub(crate) company: Option<String>,
    /// Company address
    #[arg(long)]
    pub(crate) address: Option<String>,
    /// Salary line, e.g. "GBP 32,000 per annum"
    #[arg(long)]
    pub(crate) salary: Option<String>,
    /// Start date line
    #[arg(long)]
    pub(crate) start_date: Option<String>,
    /// Work location line
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Signing HR manager
    #[arg(long)]
    pub(crate) hr_manager: Option<String>,
}

pub(crate) fn run_offer_letter(args: OfferLetterArgs) -> Result<(), AppError> {
    let OfferLetterArgs {
        name,
        role,
        company,
        address,
        salary,
        start_date,
        location,
        hr_manager,
    } = args;

    let candidate = Candidate {
        id: CandidateId("cand-preview".to_string()),
        name,
        role,
        availability: Availability::Available,
        readiness: Readiness::Ready,
        stage: PipelineStage::Offer,
        checks: Check::initial_set(),
        email: String::new(),
        phone: String::new(),
        address: String::new(),
    };

    let mut template = OfferLetterTemplate::default();
    if let Some(company) = company {
        template.company_name = company;
    }
    if let Some(address) = address {
        template.company_address = address;
    }
    if let Some(salary) = salary {
        template.salary = salary;
    }
    if let Some(start_date) = start_date {
        template.start_date = start_date;
    }
    if let Some(location) = location {
        template.location = location;
    }
    if let Some(hr_manager) = hr_manager {
        template.hr_manager = hr_manager;
    }

    let letter = hireline::workflows::recruitment::letter::render(
        &candidate,
        &template,
        &SystemReference,
    );
    println!("{}", letter.body);
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let DemoArgs {
        snapshot,
        company,
        salary,
        skip_offer,
    } = args;

    println!("Recruitment pipeline demo");
    let notifier = Arc::new(RecordingSignatureNotifier::default());
    match snapshot {
        Some(path) => {
            println!("Data source: snapshot file {}", path.display());
            let store = Arc::new(JsonFileSnapshotStore::new(path));
            walk_pipeline(store, notifier, company, salary, skip_offer)
        }
        None => {
            println!("Data source: built-in seed roster (in-memory store)");
            let store = Arc::new(InMemorySnapshotStore::default());
            walk_pipeline(store, notifier, company, salary, skip_offer)
        }
    }
}

fn walk_pipeline<S: SnapshotStore + 'static>(
    store: Arc<S>,
    notifier: Arc<RecordingSignatureNotifier>,
    company: Option<String>,
    salary: Option<String>,
    skip_offer: bool,
) -> Result<(), AppError> {
    let service = RecruitmentService::load(store, notifier.clone());

    println!("\nRoster at startup");
    for candidate in service.candidates() {
        render_candidate_line(&candidate);
    }

    println!("\nCandidate intake");
    let candidate = service.add_candidate(CandidateDraft {
        name: "Jordan Smith".to_string(),
        role: "Care Assistant".to_string(),
        email: "jordan.smith@example.com".to_string(),
        phone: "+44 7700 900321".to_string(),
        address: "14 Station Approach, Leeds, LS1 4DY".to_string(),
        ..CandidateDraft::default()
    })?;
    println!("- Received {} -> {}", candidate.name, candidate.id);

    for _ in 0..PipelineStage::BackgroundChecks.index() {
        service.advance_stage(&candidate.id)?;
    }
    let stage = service.candidate(&candidate.id)?.stage;
    println!("- Progressed to stage: {}", stage.label());

    println!("\nVerification checks");
    let upload = EvidenceUpload {
        name: "dbs-certificate.pdf".to_string(),
        content_type: "application/pdf".to_string(),
        last_modified: Utc::now(),
        bytes: b"%PDF-1.4 demo evidence".to_vec(),
    };
    let check = service.attach_evidence(&candidate.id, 0, upload)?;
    let evidence_name = check
        .evidence
        .as_ref()
        .map(|file| file.name.as_str())
        .unwrap_or("none");
    println!(
        "- {}: {} (evidence: {})",
        check.kind.label(),
        check.status.label(),
        evidence_name
    );
    for index in 1..=2 {
        let check = service.set_check_status(&candidate.id, index, CheckStatus::Passed)?;
        println!("- {}: {}", check.kind.label(), check.status.label());
    }

    for _ in PipelineStage::BackgroundChecks.index()..PipelineStage::Offer.index() {
        service.advance_stage(&candidate.id)?;
    }

    if !skip_offer {
        let mut template = OfferLetterTemplate::default();
        if let Some(company) = company {
            template.company_name = company;
        }
        if let Some(salary) = salary {
            template.salary = salary;
        }

        println!("\nOffer letter");
        let letter = service.offer_letter(&candidate.id, &template)?;
        println!("{}", letter.body);

        let sent = service.send_for_signature(&candidate.id, "Standard Offer")?;
        println!("\nSignature dispatch");
        println!("- template={} -> {}", sent.template, sent.recipient);
        println!("- {} request(s) recorded by the notifier", notifier.requests().len());
    }

    println!("\nPipeline summary");
    let summary = service.summary();
    println!(
        "- {} candidates, {} cleared every check",
        summary.total_candidates, summary.cleared_all_checks
    );
    for count in &summary.stage_counts {
        if count.candidates > 0 {
            println!("- {}: {}", count.label, count.candidates);
        }
    }

    Ok(())
}

fn render_candidate_line(candidate: &Candidate) {
    let passed = candidate
        .checks
        .iter()
        .filter(|check| check.status == CheckStatus::Passed)
        .count();
    println!(
        "- {} | {} | {} | {} / {} | checks {}/{}",
        candidate.id,
        candidate.name,
        candidate.stage.label(),
        candidate.availability.label(),
        candidate.readiness.label(),
        passed,
        candidate.checks.len()
    );
}
