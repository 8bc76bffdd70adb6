use axum::http::StatusCode;
use serde_json::json;

mod utils;

use utils::*;

#[tokio::test]
async fn test_narrativa_submission_flows_into_totals() {
    let setup = TestSetupBuilder::new().build();
    let member = setup.register("#bruma").await;

    let (status, activity) = setup
        .submit_activity(&member, "narrativa", 750, None)
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(activity["trazos"], 400);

    let user = setup.current_user(&member).await;
    assert_eq!(user["totalTrazos"], 400);
    assert_eq!(user["totalWords"], 750);
    assert_eq!(user["totalActivities"], 1);
}

#[tokio::test]
async fn test_totals_equal_sum_of_activities() {
    let setup = TestSetupBuilder::new().build();
    let member = setup.register("#bruma").await;

    let submissions = [
        ("narrativa", 1500, None),
        ("drabble", 149, None),
        ("rol", 0, Some(19)),
        ("hilo", 20, Some(4)),
        ("otro", 5, None),
    ];
    let mut expected_trazos = 0;
    let mut expected_words = 0;
    for (activity_type, words, responses) in submissions {
        let (status, activity) = setup
            .submit_activity(&member, activity_type, words, responses)
            .await;
        assert_eq!(status, StatusCode::CREATED);
        expected_trazos += activity["trazos"].as_i64().unwrap();
        expected_words += words;
    }
    assert_eq!(expected_trazos, 600 + 150 + 700 + 100 + 100);

    let user = setup.current_user(&member).await;
    assert_eq!(user["totalTrazos"], expected_trazos);
    assert_eq!(user["totalWords"], expected_words);
    assert_eq!(user["totalActivities"], 5);
}

#[tokio::test]
async fn test_rejected_submission_changes_nothing() {
    let setup = TestSetupBuilder::new().build();
    let member = setup.register("#bruma").await;

    let (status, _) = setup
        .submit_activity(&member, "narrativa", -10, None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let user = setup.current_user(&member).await;
    assert_eq!(user["totalActivities"], 0);
    assert_eq!(user["totalTrazos"], 0);
}

#[tokio::test]
async fn test_rankings_follow_totals_and_ties() {
    let setup = TestSetupBuilder::new().build();
    let first = setup.register("#primera").await;
    let second = setup.register("#segunda").await;
    let third = setup.register("#tercera").await;

    // second: 700 trazos, 0 words; first and third tie on 300 trazos
    setup.submit_activity(&second, "rol", 0, Some(20)).await;
    setup.submit_activity(&third, "narrativa", 300, None).await;
    setup.submit_activity(&first, "narrativa", 2000, None).await;

    let by_trazos = setup.rankings(&first, "trazos").await;
    LeaderboardAssertion::by_trazos(&by_trazos)
        .has_len(3)
        .is_non_increasing()
        .has_no_duplicates()
        .user_order(&[second.id, first.id, third.id]);

    let by_words = setup.rankings(&first, "words").await;
    LeaderboardAssertion::by_words(&by_words)
        .is_non_increasing()
        .user_order(&[first.id, third.id, second.id]);
}

#[tokio::test]
async fn test_ranking_limit() {
    let setup = TestSetupBuilder::new().with_ranking_limit(2).build();
    let mut members = Vec::new();
    for n in 0..4 {
        members.push(setup.register(&format!("#m{}", n)).await);
    }

    let leaderboard = setup.rankings(&members[0], "trazos").await;
    LeaderboardAssertion::by_trazos(&leaderboard).has_len(2);

    let (_, limited) = setup
        .send("GET", "/api/rankings/trazos?limit=3", Some(&members[0].token), None)
        .await;
    LeaderboardAssertion::by_trazos(&limited).has_len(3);

    let (status, _) = setup
        .send("GET", "/api/rankings/words?limit=0", Some(&members[0].token), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_rank_change_does_not_touch_trazos() {
    let setup = TestSetupBuilder::new().build();
    let admin = setup.register("#INELUDIBLE").await;
    let member = setup.register("#bruma").await;
    setup.submit_activity(&member, "pinturas", 0, None).await;

    let (status, _) = setup
        .send(
            "POST",
            "/api/admin/update-rank",
            Some(&admin.token),
            Some(json!({"signature": "#bruma", "rank": "arquitecto_del_alma"})),
        )
        .await;
    assert_eq!(status, StatusCode::OK);

    let user = setup.current_user(&member).await;
    assert_eq!(user["rank"], "arquitecto_del_alma");
    assert_eq!(user["medal"], "Arquitecto de personajes");
    assert_eq!(user["totalTrazos"], 200);
}

#[tokio::test]
async fn test_promoted_member_can_publish_immediately() {
    let setup = TestSetupBuilder::new().build();
    let admin = setup.register("#INELUDIBLE").await;
    let member = setup.register("#bruma").await;
    let news = json!({"title": "Concurso", "content": "Abierto hasta fin de mes"});

    let (status, _) = setup
        .send("POST", "/api/news", Some(&member.token), Some(news.clone()))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    setup
        .send(
            "POST",
            "/api/admin/update-role",
            Some(&admin.token),
            Some(json!({"signature": "bruma", "role": "admin"})),
        )
        .await;

    // Same token; the role is reloaded on every request
    let (status, _) = setup
        .send("POST", "/api/news", Some(&member.token), Some(news))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, listed) = setup.send("GET", "/api/news", Some(&admin.token), None).await;
    assert_eq!(listed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_preview_matches_stored_score() {
    let setup = TestSetupBuilder::new().build();
    let member = setup.register("#bruma").await;

    let (_, preview) = setup
        .send(
            "POST",
            "/api/calculate-trazos",
            Some(&member.token),
            Some(json!({"type": "drabble", "words": 150})),
        )
        .await;
    let (_, stored) = setup.submit_activity(&member, "drabble", 150, None).await;
    assert_eq!(preview["trazos"], stored["trazos"]);
    assert_eq!(preview["trazos"], 200);
}
