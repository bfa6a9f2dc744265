use computer_database::{ApiClient, CdbError, Company, ComputerDatabase, ComputerModel};
use httpmock::prelude::*;
use serde_json::json;

#[tokio::test]
async fn test_get_computer_model_hydrates_company_one_hop() {
    let server = MockServer::start();
    let model_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/companies/c1/computer-models/m1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "id": "m1",
                "name": "IIe",
                "release": "1983",
                "company": "/companies/c1"
            }));
    });
    let company_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/companies/c1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "id": "c1",
                "name": "Acme",
                "location": "NY",
                "computerModels": [
                    "/companies/c1/computer-models/m1",
                    "/companies/c1/computer-models/m2"
                ]
            }));
    });
    let sibling_mock = server.mock(|when, then| {
        when.method(GET).path("/api/v1/companies/c1/computer-models/m2");
        then.status(200)
            .json_body(json!({"id": "m2", "name": "III", "release": "1980"}));
    });

    let client = ApiClient::new(&server.url("/api/v1")).unwrap();
    let computer_model = client.get_computer_model("c1", "m1").await.unwrap();

    model_mock.assert_hits(1);
    company_mock.assert_hits(1);
    sibling_mock.assert_hits(0);

    assert_eq!(computer_model.id, "m1");
    assert_eq!(computer_model.name, "IIe");
    assert_eq!(computer_model.release, "1983");
    let company = computer_model.company().unwrap();
    assert_eq!(company.id, "c1");
    assert_eq!(company.name, "Acme");
    assert_eq!(company.location, "NY");
    assert!(company.computer_models().is_none());
}

#[tokio::test]
async fn test_get_computer_model_survives_missing_company() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/companies/c1/computer-models/m1");
        then.status(200).json_body(json!({
            "id": "m1",
            "name": "IIe",
            "release": "1983",
            "company": server.url("/companies/gone")
        }));
    });
    let company_mock = server.mock(|when, then| {
        when.method(GET).path("/companies/gone");
        then.status(404);
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    let computer_model = client.get_computer_model("c1", "m1").await.unwrap();

    company_mock.assert();
    assert_eq!(computer_model.id, "m1");
    assert_eq!(computer_model.name, "IIe");
    assert_eq!(computer_model.release, "1983");
    assert!(computer_model.company().is_none());
}

#[tokio::test]
async fn test_get_computer_model_survives_malformed_company() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/companies/c1/computer-models/m1");
        then.status(200).json_body(json!({
            "id": "m1",
            "name": "IIe",
            "release": "1983",
            "company": "/companies/c1"
        }));
    });
    server.mock(|when, then| {
        when.method(GET).path("/companies/c1");
        then.status(200).body("{\"id\": 1}");
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    let computer_model = client.get_computer_model("c1", "m1").await.unwrap();

    assert!(computer_model.company().is_none());
}

#[tokio::test]
async fn test_get_computer_model_ignores_non_http_company_link() {
    let server = MockServer::start();
    let model_mock = server.mock(|when, then| {
        when.method(GET).path("/companies/c1/computer-models/m1");
        then.status(200).json_body(json!({
            "id": "m1",
            "name": "IIe",
            "release": "1983",
            "company": "mailto:x"
        }));
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    let computer_model = client.get_computer_model("c1", "m1").await.unwrap();

    model_mock.assert();
    assert_eq!(computer_model.id, "m1");
    assert!(computer_model.company().is_none());
}

#[tokio::test]
async fn test_get_computer_model_ignores_unparsable_company_link() {
    let server = MockServer::start();
    let model_mock = server.mock(|when, then| {
        when.method(GET).path("/companies/c1/computer-models/m1");
        then.status(200).json_body(json!({
            "id": "m1",
            "name": "IIe",
            "release": "1983",
            "company": "http://[::1"
        }));
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    let computer_model = client.get_computer_model("c1", "m1").await.unwrap();

    model_mock.assert();
    assert!(computer_model.company().is_none());
}

#[tokio::test]
async fn test_get_computer_model_without_company_link() {
    let server = MockServer::start();
    let model_mock = server.mock(|when, then| {
        when.method(GET).path("/companies/c1/computer-models/m1");
        then.status(200)
            .json_body(json!({"id": "m1", "name": "IIe", "release": "1983"}));
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    let computer_model = client.get_computer_model("c1", "m1").await.unwrap();

    model_mock.assert();
    assert!(computer_model.company().is_none());
}

#[tokio::test]
async fn test_get_missing_computer_model_reports_status() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(GET).path("/companies/c1/computer-models/m404");
        then.status(404);
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    let err = client.get_computer_model("c1", "m404").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
}

#[tokio::test]
async fn test_create_computer_model_requires_company_before_any_request() {
    let server = MockServer::start();
    let any_post = server.mock(|when, then| {
        when.method(POST);
        then.status(201);
    });

    let client = ApiClient::new(&server.base_url()).unwrap();

    let orphan = ComputerModel::new("m1", "IIe", "1983");
    let err = client.create_computer_model(&orphan).await.unwrap_err();
    assert!(matches!(err, CdbError::MissingCompanyError { ref model_id } if model_id == "m1"));

    let unnamed_owner = orphan.with_company(Company::new("", "Acme", "NY"));
    let err = client.create_computer_model(&unnamed_owner).await.unwrap_err();
    assert!(matches!(err, CdbError::MissingCompanyError { .. }));

    any_post.assert_hits(0);
}

#[tokio::test]
async fn test_create_computer_model_posts_under_owner() {
    let server = MockServer::start();
    let create_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/companies/c1/computer-models")
            .json_body(json!({"id": "m3", "name": "Lisa", "release": "1983"}));
        then.status(201);
    });

    let computer_model =
        ComputerModel::new("m3", "Lisa", "1983").with_company(Company::new("c1", "Acme", "NY"));

    let client = ApiClient::new(&server.base_url()).unwrap();
    client.create_computer_model(&computer_model).await.unwrap();

    create_mock.assert();
}

#[tokio::test]
async fn test_create_computer_model_unknown_company() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/companies/c9/computer-models");
        then.status(412);
    });

    let computer_model =
        ComputerModel::new("m3", "Lisa", "1983").with_company(Company::new("c9", "", ""));

    let client = ApiClient::new(&server.base_url()).unwrap();
    let err = client
        .create_computer_model(&computer_model)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(412));
}

#[tokio::test]
async fn test_delete_computer_model() {
    let server = MockServer::start();
    let delete_mock = server.mock(|when, then| {
        when.method(DELETE).path("/companies/c1/computer-models/m1");
        then.status(204);
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    client.delete_computer_model("c1", "m1").await.unwrap();

    delete_mock.assert();
}

#[tokio::test]
async fn test_delete_computer_model_route_not_found() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(DELETE).path("/companies/c1/computer-models/m1");
        then.status(404);
    });

    let client = ApiClient::new(&server.base_url()).unwrap();
    let err = client.delete_computer_model("c1", "m1").await.unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert!(!err.is_retryable());
}
