mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::{json, Value};

use common::student;

#[tokio::test]
async fn create_then_get_round_trips() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app.post("/api/student", &student(1, "juan@school.edu")).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["Student_ID"], 1);
    assert_eq!(created["DateOfBirth"], "2003-04-15");
    assert!(created["createdAt"].is_string());
    assert!(created["updatedAt"].is_string());

    let res = app.get("/api/student/1").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let fetched: Value = res.json().await?;
    assert_eq!(fetched, created);
    Ok(())
}

#[tokio::test]
async fn numeric_strings_and_timestamps_are_normalized() -> Result<()> {
    let app = common::spawn_app().await?;

    let mut body = student(2, "ana@school.edu");
    body["Student_ID"] = json!("2");
    body["YearLevel"] = json!("3");
    body["DateOfBirth"] = json!("2004-02-29T08:30:00Z");

    let res = app.post("/api/student", &body).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = res.json().await?;
    assert_eq!(created["Student_ID"], 2);
    assert_eq!(created["YearLevel"], 3);
    assert_eq!(created["DateOfBirth"], "2004-02-29");
    Ok(())
}

#[tokio::test]
async fn invalid_body_reports_every_field_and_persists_nothing() -> Result<()> {
    let app = common::spawn_app().await?;

    let mut body = student(3, "not-an-email");
    body["YearLevel"] = json!(9);
    body["Sex"] = json!("Unknown");
    body["Nickname"] = json!("JD");
    if let Some(fields) = body.as_object_mut() {
        fields.remove("FirstName");
    }

    let res = app.post("/api/student", &body).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert_eq!(err["code"], "VALIDATION_ERROR");
    assert_eq!(
        common::error_fields(&err),
        vec!["YearLevel", "FirstName", "Email", "Sex", "Nickname"]
    );
    assert_eq!(err["details"][0]["message"], "Year Level must be between 1 and 6");
    assert_eq!(err["details"][2]["message"], "Please provide a valid email address");

    let res = app.get("/api/student/3").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app
        .client
        .post(app.url("/api/student"))
        .bearer_auth(&app.token)
        .header("Content-Type", "application/json")
        .body("{\"Student_ID\": ")
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);

    let res = app.post("/api/student", &json!([1, 2, 3])).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn duplicate_email_or_id_conflicts_without_writing() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app.post("/api/student", &student(1, "juan@school.edu")).await?;
    assert_eq!(res.status(), StatusCode::CREATED);

    let res = app.post("/api/student", &student(2, "juan@school.edu")).await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let err: Value = res.json().await?;
    assert_eq!(err["message"], "Email already exists");

    let res = app.post("/api/student", &student(1, "other@school.edu")).await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let err: Value = res.json().await?;
    assert_eq!(err["message"], "Student ID already exists");

    let res = app.get("/api/student/2").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.get("/api/student").await?;
    let page: Value = res.json().await?;
    assert_eq!(page["pagination"]["total"], 1);
    Ok(())
}

#[tokio::test]
async fn list_paginates_in_insertion_order() -> Result<()> {
    let app = common::spawn_app().await?;

    for id in [5, 3, 8] {
        let res = app
            .post("/api/student", &student(id, &format!("s{}@school.edu", id)))
            .await?;
        assert_eq!(res.status(), StatusCode::CREATED);
    }

    let res = app.get("/api/student?page=1&limit=2").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let first: Value = res.json().await?;
    let ids: Vec<i64> = first["data"]
        .as_array()
        .map(|d| d.iter().filter_map(|s| s["Student_ID"].as_i64()).collect())
        .unwrap_or_default();
    assert_eq!(ids, vec![5, 3]);
    assert_eq!(first["pagination"], json!({ "total": 3, "pages": 2, "page": 1, "limit": 2 }));

    let res = app.get("/api/student?page=2&limit=2").await?;
    let second: Value = res.json().await?;
    assert_eq!(second["data"].as_array().map(Vec::len), Some(1));
    assert_eq!(second["data"][0]["Student_ID"], 8);

    let res = app.get("/api/student?page=5&limit=2").await?;
    let beyond: Value = res.json().await?;
    assert_eq!(beyond["data"], json!([]));
    assert_eq!(beyond["pagination"]["total"], 3);
    Ok(())
}

#[tokio::test]
async fn list_defaults_and_empty_collection() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app.get("/api/student").await?;
    assert_eq!(res.status(), StatusCode::OK);
    let page: Value = res.json().await?;
    assert_eq!(page["data"], json!([]));
    assert_eq!(page["pagination"], json!({ "total": 0, "pages": 0, "page": 1, "limit": 10 }));
    Ok(())
}

#[tokio::test]
async fn list_rejects_bad_page_parameters() -> Result<()> {
    let app = common::spawn_app().await?;

    for query in ["page=0", "page=abc", "limit=0", "limit=101"] {
        let res = app.get(&format!("/api/student?{}", query)).await?;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "{}", query);
        let err: Value = res.json().await?;
        assert_eq!(err["code"], "VALIDATION_ERROR");
    }
    Ok(())
}

#[tokio::test]
async fn update_merges_fields_and_keeps_created_at() -> Result<()> {
    let app = common::spawn_app().await?;

    let mut body = student(1, "juan@school.edu");
    body["Occupation"] = json!("Barista");
    let created: Value = app.post("/api/student", &body).await?.json().await?;

    let res = app
        .put("/api/student/1", &json!({ "YearLevel": 3, "Occupation": null }))
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated: Value = res.json().await?;
    assert_eq!(updated["YearLevel"], 3);
    assert_eq!(updated["FirstName"], "Juan");
    assert!(updated.get("Occupation").is_none());
    assert_eq!(updated["createdAt"], created["createdAt"]);

    let fetched: Value = app.get("/api/student/1").await?.json().await?;
    assert_eq!(fetched, updated);
    Ok(())
}

#[tokio::test]
async fn update_validates_only_supplied_fields() -> Result<()> {
    let app = common::spawn_app().await?;
    app.post("/api/student", &student(1, "juan@school.edu")).await?;

    let res = app
        .put("/api/student/1", &json!({ "Email": "broken", "FirstName": null }))
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert_eq!(common::error_fields(&err), vec!["FirstName", "Email"]);

    let fetched: Value = app.get("/api/student/1").await?.json().await?;
    assert_eq!(fetched["Email"], "juan@school.edu");
    Ok(())
}

#[tokio::test]
async fn update_cannot_change_id_or_steal_an_email() -> Result<()> {
    let app = common::spawn_app().await?;
    app.post("/api/student", &student(1, "juan@school.edu")).await?;
    app.post("/api/student", &student(2, "ana@school.edu")).await?;

    let res = app.put("/api/student/1", &json!({ "Student_ID": 7 })).await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let err: Value = res.json().await?;
    assert_eq!(err["details"][0]["message"], "Student_ID cannot be changed");

    let res = app.put("/api/student/1", &json!({ "Student_ID": 1 })).await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = app.put("/api/student/1", &json!({ "Email": "ana@school.edu" })).await?;
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let err: Value = res.json().await?;
    assert_eq!(err["message"], "Email already exists");

    // Re-saving its own email is not a conflict.
    let res = app.put("/api/student/1", &json!({ "Email": "juan@school.edu" })).await?;
    assert_eq!(res.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn missing_ids_are_not_found() -> Result<()> {
    let app = common::spawn_app().await?;

    let res = app.get("/api/student/42").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let err: Value = res.json().await?;
    assert_eq!(err["message"], "Student not found");

    let res = app.put("/api/student/42", &json!({ "YearLevel": 2 })).await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.delete("/api/student/42").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.get("/api/student/abc").await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    Ok(())
}

#[tokio::test]
async fn delete_removes_exactly_once() -> Result<()> {
    let app = common::spawn_app().await?;
    app.post("/api/student", &student(1, "juan@school.edu")).await?;

    let res = app.delete("/api/student/1").await?;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(res.bytes().await?.is_empty());

    let res = app.get("/api/student/1").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = app.delete("/api/student/1").await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The email is free again.
    let res = app.post("/api/student", &student(2, "juan@school.edu")).await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    Ok(())
}
