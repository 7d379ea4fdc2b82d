//! End-to-end matching scenarios exercised through the public engine, importer, and router.

use std::io::Cursor;
use std::sync::{Arc, Mutex};

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use yuvasetu::config::MatchingConfig;
use yuvasetu::workflows::import::PostingCsvImporter;
use yuvasetu::workflows::matching::{
    matching_router, AllocationRecord, AllocationRepository, InternshipPosting, MatchEngine,
    MatchService, PostingId, PostingRepository, RepositoryError, StudentCategory, StudentProfile,
};

const EXPORT: &str = "id,title,organization,location,skills,capacity,allocated,description\n\
frontend,Frontend Intern,Acme,Delhi,react;ui/ux,20,12,Build dashboards\n\
cobol,Mainframe Intern,Legacy Bank,Mumbai,cobol,10,10,Batch jobs\n\
data,Data Intern,Digital India,Delhi,python;sql,5,0,Reporting\n\
ops,Ops Intern,Rail Ministry,Pune,kubernetes,3,0,Clusters\n\
design,Design Intern,Craft Council,Jaipur,figma,0,0,Visual design\n\
ml,ML Intern,ISRO,Bengaluru,python;pytorch,2,2,Models\n";

fn student() -> StudentProfile {
    StudentProfile {
        skills: Some(vec!["React".to_string(), "Python".to_string()]),
        location: Some("Delhi".to_string()),
        first_timer: true,
        category: Some(StudentCategory::General),
        ..StudentProfile::default()
    }
}

fn postings() -> Vec<InternshipPosting> {
    PostingCsvImporter::from_reader(Cursor::new(EXPORT)).expect("export parses")
}

#[derive(Default)]
struct VecPostings(Mutex<Vec<InternshipPosting>>);

impl PostingRepository for VecPostings {
    fn insert(&self, posting: InternshipPosting) -> Result<InternshipPosting, RepositoryError> {
        self.0.lock().expect("poisoned").push(posting.clone());
        Ok(posting)
    }

    fn update(&self, posting: InternshipPosting) -> Result<(), RepositoryError> {
        let mut guard = self.0.lock().expect("poisoned");
        let slot = guard
            .iter_mut()
            .find(|existing| existing.id == posting.id)
            .ok_or(RepositoryError::NotFound)?;
        *slot = posting;
        Ok(())
    }

    fn fetch(&self, id: &PostingId) -> Result<Option<InternshipPosting>, RepositoryError> {
        let guard = self.0.lock().expect("poisoned");
        Ok(guard.iter().find(|posting| &posting.id == id).cloned())
    }

    fn list(&self) -> Result<Vec<InternshipPosting>, RepositoryError> {
        Ok(self.0.lock().expect("poisoned").clone())
    }
}

#[derive(Default)]
struct VecAllocations(Mutex<Vec<AllocationRecord>>);

impl AllocationRepository for VecAllocations {
    fn record(&self, allocation: AllocationRecord) -> Result<AllocationRecord, RepositoryError> {
        self.0.lock().expect("poisoned").push(allocation.clone());
        Ok(allocation)
    }

    fn for_posting(&self, id: &PostingId) -> Result<Vec<AllocationRecord>, RepositoryError> {
        let guard = self.0.lock().expect("poisoned");
        Ok(guard
            .iter()
            .filter(|record| &record.internship_id == id)
            .cloned()
            .collect())
    }
}

#[test]
fn imported_postings_rank_top_five() {
    let postings = postings();
    let profile = student();

    let matches = MatchEngine::default().rank(Some(&profile), Some(postings.as_slice()), 5);

    let ranked: Vec<(&str, i32)> = matches
        .iter()
        .map(|scored| (scored.posting.id.0.as_str(), scored.score))
        .collect();
    assert_eq!(
        ranked,
        vec![
            ("frontend", 14),
            ("data", 14),
            ("ops", 4),
            ("design", 3),
            ("ml", -1),
        ]
    );
}

#[test]
fn zero_capacity_posting_gets_no_capacity_note() {
    let postings = postings();
    let design = postings
        .iter()
        .find(|posting| posting.id.0 == "design")
        .expect("design posting");

    let evaluation = MatchEngine::default().score(&student(), design);

    assert_eq!(evaluation.explanation(), vec!["First-timer bonus (+3)".to_string()]);
}

#[tokio::test]
async fn match_endpoint_serves_imported_postings() {
    let repository = Arc::new(VecPostings::default());
    for posting in postings() {
        repository.insert(posting).expect("seed");
    }
    let service = Arc::new(MatchService::new(
        repository,
        Arc::new(VecAllocations::default()),
        MatchEngine::default(),
        MatchingConfig::default(),
    ));

    let response = matching_router(service)
        .oneshot(
            Request::post("/api/match")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(
                    serde_json::to_vec(&json!({ "studentProfile": student(), "topN": 2 }))
                        .expect("serialize"),
                ))
                .expect("request builds"),
        )
        .await
        .expect("route executes");

    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), 64 * 1024)
        .await
        .expect("read body");
    let payload: Value = serde_json::from_slice(&body).expect("json payload");
    let matches = payload["matches"].as_array().expect("matches");
    assert_eq!(matches.len(), 2);
    assert_eq!(matches[0]["organization"], json!("Acme"));
    assert_eq!(matches[1]["id"], json!("data"));
}
