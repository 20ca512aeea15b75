mod common;

use actix_web::{test, web, App};
use serde_json::json;

use common::{state_with, StubLlm, StubTools};
use journey_api::routes;

const LISBON_PLAN: &str = r#"{
    "destination": "Lisbon",
    "travel_dates": "mid October",
    "num_travelers": 2,
    "features": {"flights": false, "hotels": true, "youtube": true},
    "research_topics": ["history in Lisbon", "food in Lisbon"]
}"#;

const FINAL_DOCUMENT: &str = "# Lisbon in 3 Days\n\n## Hotel Options\n...\n\n## Recommended YouTube Vlogs\n...\n\n## General Travel Research\n...";

#[actix_web::test]
async fn chat_runs_the_full_pipeline() {
    let llm = StubLlm::new(&[LISBON_PLAN, FINAL_DOCUMENT]);
    let state = state_with(llm.clone(), StubTools::reliable());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(&json!({ "prompt": "3 days in Lisbon for 2 people, food and history" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let body: serde_json::Value = test::read_body_json(resp).await;
    let itinerary = body["itinerary"].as_str().unwrap_or_default();
    assert!(itinerary.contains("Hotel Options"));
    assert!(itinerary.contains("Recommended YouTube Vlogs"));
    assert!(itinerary.contains("General Travel Research"));

    // The synthesis prompt carried every researched section, delimited.
    let synthesis_prompt = llm.prompt(1);
    assert!(synthesis_prompt.contains("--- HOTEL OPTIONS ---"));
    assert!(synthesis_prompt.contains("--- RECOMMENDED YOUTUBE VLOGS ---"));
    assert!(synthesis_prompt.contains("--- GENERAL TRAVEL RESEARCH ---"));
    assert!(synthesis_prompt.contains("history in Lisbon"));
    assert!(synthesis_prompt.contains("food in Lisbon"));
}

#[actix_web::test]
async fn failed_research_still_yields_an_itinerary_with_a_gap_marker() {
    // Video lookups are down; searches succeed.
    let llm = StubLlm::new(&[LISBON_PLAN, FINAL_DOCUMENT]);
    let state = state_with(llm.clone(), StubTools::failing(&["find_video"]));
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(&json!({ "prompt": "3 days in Lisbon for 2 people, food and history" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(resp.status().is_success());

    let synthesis_prompt = llm.prompt(1);
    assert!(synthesis_prompt.contains("Research unavailable for this topic."));
    // The sibling research still made it through.
    assert!(synthesis_prompt.contains("food in Lisbon"));
}

#[actix_web::test]
async fn unplannable_prompt_is_surfaced_not_synthesized() {
    let llm = StubLlm::new(&["Sure! Let me think about travel in general."]);
    let state = state_with(llm.clone(), StubTools::reliable());
    let app = test::init_service(
        App::new()
            .app_data(web::Data::new(state))
            .configure(routes::configure),
    )
    .await;

    let req = test::TestRequest::post()
        .uri("/chat")
        .set_json(&json!({ "prompt": "hello there" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.status(),
        actix_web::http::StatusCode::UNPROCESSABLE_ENTITY
    );

    let body: serde_json::Value = test::read_body_json(resp).await;
    let message = body["error"].as_str().unwrap_or_default();
    assert!(message.contains("couldn't identify"));
    // Only the planner call happened; the synthesizer was never reached.
    assert_eq!(llm.prompts.lock().unwrap().len(), 1);
}
