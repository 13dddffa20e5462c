//! End-to-end generation from documents on disk and over HTTP.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::fs;
use std::sync::Arc;

use oats_core::{Error, GenerateOptions, ReqwestFetch, Source, generate, resolve_locator};
use serde_json::json;
use tempfile::TempDir;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ROOT: &str = r##"
openapi: 3.0.3
info:
  title: Pets
  version: "1"
paths:
  /pets/{petId}:
    parameters:
      - $ref: "#/components/parameters/PetId"
    get:
      operationId: getPet
      responses:
        "200":
          description: A pet
          content:
            application/json:
              schema:
                $ref: "#/components/schemas/Pet"
components:
  parameters:
    PetId:
      name: petId
      in: path
      required: true
      schema:
        $ref: "./common.yaml#/components/schemas/Id"
  schemas:
    Pet:
      oneOf:
        - $ref: "#/components/schemas/Cat"
      discriminator:
        propertyName: petType
        mapping:
          cat: "#/components/schemas/Cat"
    Cat:
      allOf:
        - $ref: "#/components/schemas/Pet"
        - type: object
          properties:
            id:
              $ref: "./common.yaml#/components/schemas/Id"
"##;

const COMMON: &str = r#"
components:
  schemas:
    Id:
      type: string
      format: uuid
"#;

fn direct_options() -> GenerateOptions {
    let client = reqwest::Client::builder().no_proxy().build().unwrap();
    GenerateOptions {
        fetch: Some(Arc::new(ReqwestFetch::with_client(client))),
        ..GenerateOptions::default()
    }
}

#[tokio::test]
async fn test_generate_from_files() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("openapi.yaml"), ROOT).unwrap();
    fs::write(dir.path().join("common.yaml"), COMMON).unwrap();

    let url = resolve_locator(dir.path().join("openapi.yaml").to_str().unwrap()).unwrap();
    let output = generate(Source::Url(url), &GenerateOptions::default())
        .await
        .unwrap();

    assert!(output.starts_with("/**\n * This file was auto-generated by oats."));
    assert!(output.contains("get: operations[\"getPet\"];"));
    assert!(output.contains("path: Pick<components[\"parameters\"], \"PetId\">;"));
    assert!(output.contains("petType: \"cat\";"));
    assert!(output.contains("Omit<components[\"schemas\"][\"Pet\"], \"petType\">"));
    assert!(output.contains("id?: external[\"common.yaml\"][\"components\"][\"schemas\"][\"Id\"];"));
    assert!(output.contains("export interface external {\n  \"common.yaml\": {"));
    assert!(output.contains("/** Format: uuid */"));
    assert!(output.contains("export interface operations {\n  getPet: {"));
}

#[tokio::test]
async fn test_generate_from_remote_fetches_shared_document_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/openapi.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(ROOT))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/common.yaml"))
        .respond_with(ResponseTemplate::new(200).set_body_string(COMMON))
        .expect(1)
        .mount(&server)
        .await;

    let url = resolve_locator(&format!("{}/openapi.yaml", server.uri())).unwrap();
    let output = generate(Source::Url(url), &direct_options()).await.unwrap();
    assert!(output.contains("external[\"common.yaml\"][\"components\"][\"schemas\"][\"Id\"]"));
}

#[tokio::test]
async fn test_generate_from_stream() {
    let stream: &'static [u8] =
        br#"{ "openapi": "3.1.0", "components": { "schemas": { "Flag": { "type": "boolean", "nullable": true } } } }"#;
    let output = generate(Source::Stream(Box::new(stream)), &GenerateOptions::default())
        .await
        .unwrap();
    assert!(output.contains("Flag: boolean | null;"));
    assert!(output.contains("export type paths = Record<string, never>;"));
}

#[tokio::test]
async fn test_in_memory_root_cannot_reference_relative_files() {
    let document = json!({
        "openapi": "3.0.0",
        "components": { "schemas": { "Id": { "$ref": "./common.yaml#/Id" } } }
    });
    let err = generate(Source::Value(document), &GenerateOptions::default())
        .await
        .unwrap_err();
    assert!(matches!(err, Error::VirtualRelativeRef(_)), "{err}");
}
