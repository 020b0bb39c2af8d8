use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use gworkspace::auth::{
    AuthorizationCodeCallback, AuthorizationUrl, Config, OAuth2TokenProvider,
    ServiceAccountTokenProvider, StaticTokenProvider,
};
use gworkspace::calendar::{Event, SendUpdates};
use gworkspace::docs::types::{InsertTextRequest, TextStyle, UpdateTextStyleRequest};
use gworkspace::drive::ListFilesParams;
use gworkspace::gmail::MimeMessage;
use gworkspace::slides::types::{
    AffineTransform, CreateShapeRequest, CreateSlideRequest, InsertTextRequest as SlideText,
    LayoutReference, PageElementProperties, PredefinedLayout, ShapeType, Size,
};
use gworkspace::time::{add_seconds, now};
use gworkspace::{Authenticate, Context, Scopes, TokioFileTokenStore};
use log::{info, warn};
use serde_json::json;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

const DEFAULT_TOKEN_PATH: &str = "~/.config/gworkspace/token.json";

/// Prints the consent URL and reads the code from stdin.
#[derive(Debug)]
struct StdinCodeCallback;

#[async_trait]
impl AuthorizationCodeCallback for StdinCodeCallback {
    async fn authorization_code(&self, url: &AuthorizationUrl) -> gworkspace::Result<String> {
        let mut stdout = tokio::io::stdout();
        let prompt = format!(
            "Open this URL in your browser and grant access:\n\n{}\n\nPaste the `code` parameter of the redirect: ",
            url.url
        );
        stdout.write_all(prompt.as_bytes()).await?;
        stdout.flush().await?;

        let mut line = String::new();
        BufReader::new(tokio::io::stdin()).read_line(&mut line).await?;
        Ok(line.trim().to_string())
    }
}

fn env(ctx: &Context, key: &str) -> Option<String> {
    let v = ctx.env_var(key).filter(|v| !v.is_empty());
    if v.is_none() {
        warn!("{key} is not set, skipping");
    }
    v
}

/// Exercise Sheets, Slides, Docs and Calendar with `provider`.
///
/// Scopes configured through `GOOGLE_SCOPES` replace each product's defaults.
async fn run_products<A>(ctx: &Context, config: &Config, provider: A) -> Result<()>
where
    A: Authenticate + Clone,
{
    if let Some(id) = env(ctx, "GOOGLE_SPREADSHEET_ID") {
        let client = gworkspace::sheets::Client::new(ctx.clone(), provider.clone())
            .with_scopes(config.scopes_or(gworkspace::sheets::DEFAULT_SCOPES));
        let resp = client
            .values_append(
                &id,
                "Sheet1",
                None,
                vec![vec![
                    json!("Test Recipe"),
                    json!("test, ingredients, api"),
                    json!("This is a test recipe added via API"),
                ]],
            )
            .await?;
        println!("sheets: {:?}", resp.updates);
    }

    if let Some(id) = env(ctx, "GOOGLE_SLIDES_ID") {
        use gworkspace::slides::Request;

        let client = gworkspace::slides::Client::new(ctx.clone(), provider.clone())
            .with_scopes(config.scopes_or(gworkspace::slides::DEFAULT_SCOPES));
        let suffix = now().timestamp();
        let slide_id = format!("slide_{suffix}");
        let box_id = format!("box_{suffix}");
        let requests = [
            Request::create_slide(CreateSlideRequest {
                object_id: Some(slide_id.clone()),
                slide_layout_reference: Some(LayoutReference {
                    predefined_layout: PredefinedLayout::Blank,
                }),
                ..Default::default()
            }),
            Request::create_shape(CreateShapeRequest {
                object_id: Some(box_id.clone()),
                element_properties: PageElementProperties {
                    page_object_id: slide_id,
                    size: Some(Size::pt(300.0, 100.0)),
                    transform: Some(AffineTransform::translate_pt(100.0, 100.0)),
                },
                shape_type: ShapeType::TextBox,
            }),
            Request::insert_text(SlideText {
                object_id: box_id,
                insertion_index: Some(0),
                text: "Hello from API!".to_string(),
            }),
        ];
        let resp = client.presentations_batch_update(&id, &requests).await?;
        println!("slides: {} replies", resp.replies.len());
    }

    if let Some(id) = env(ctx, "GOOGLE_DOCUMENT_ID") {
        use gworkspace::docs::Request;

        let client = gworkspace::docs::Client::new(ctx.clone(), provider.clone())
            .with_scopes(config.scopes_or(gworkspace::docs::DEFAULT_SCOPES));
        client
            .documents_batch_update(
                &id,
                &[Request::insert_text(InsertTextRequest::at_end("\nText from API\n"))],
            )
            .await?;

        let doc = client.documents_get(&id).await?;
        println!("docs: {:?} rev {:?}", doc.title, doc.revision_id);
        if let Some(last) = doc.last_element() {
            let bold = UpdateTextStyleRequest {
                range: last.range(),
                text_style: TextStyle {
                    bold: Some(true),
                    ..Default::default()
                },
                fields: "*".to_string(),
            };
            client
                .documents_batch_update(&id, &[Request::update_text_style(bold)])
                .await?;
        }
    }

    if let Some(id) = env(ctx, "GOOGLE_CALENDAR_ID") {
        let client = gworkspace::calendar::Client::new(ctx.clone(), provider)
            .with_scopes(config.scopes_or(gworkspace::calendar::DEFAULT_SCOPES));
        let start = now();
        let event = Event::new("Sample Event", start, add_seconds(start, 3600)?)
            .with_description("This is a test event created via the Calendar API.")
            .with_location("Online");
        let created = client.events_insert(&id, &event, SendUpdates::All).await?;
        println!("calendar: {:?}", created.html_link);
    }

    Ok(())
}

async fn run_oauth2(ctx: &Context, config: &Config) -> Result<()> {
    let Some(client_config) = config.oauth_client_config() else {
        return Ok(());
    };

    let token_path = config.oauth_token_path.clone().unwrap_or_else(|| {
        ctx.expand_home_dir(DEFAULT_TOKEN_PATH)
            .unwrap_or_else(|| DEFAULT_TOKEN_PATH.to_string())
    });
    let mut provider = OAuth2TokenProvider::new(client_config)
        .with_token_store(TokioFileTokenStore::new(token_path))
        .with_code_callback(StdinCodeCallback);
    if let Some(token) = &config.oauth_refresh_token {
        provider = provider.with_refresh_token(token);
    }
    let provider = Arc::new(provider);

    // One consent covers both clients.
    let defaults: Vec<&str> = gworkspace::gmail::DEFAULT_SCOPES
        .iter()
        .chain(gworkspace::drive::DEFAULT_SCOPES)
        .copied()
        .collect();
    let scopes: Scopes = config.scopes_or(&defaults);

    let drive = gworkspace::drive::Client::new(ctx.clone(), provider.clone())
        .with_scopes(scopes.clone());
    let mut params = ListFilesParams::default().with_page_size(5);
    if let Some(q) = ctx.env_var("GOOGLE_DRIVE_QUERY") {
        params = params.with_query(q);
    }
    let files = drive.files_list(&params).await?;
    println!("drive: found {} files", files.files.len());
    for file in &files.files {
        println!("- {} ({})", file.name, file.mime_type);
    }

    if let Some(to) = env(ctx, "GOOGLE_DRAFT_TO") {
        let gmail = gworkspace::gmail::Client::new(ctx.clone(), provider).with_scopes(scopes);
        let message = MimeMessage::new([to])
            .with_subject("Sample Event")
            .with_body("This is a test draft created via the Gmail API.");
        let draft = gmail.drafts_create(&message).await?;
        println!("gmail: draft {:?}", draft.id);
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let _ = dotenv::dotenv();
    env_logger::init();

    let ctx = gworkspace::default_context();
    let config = Config::from_env(&ctx);

    if let Some(token) = &config.access_token {
        info!("using the access token from GOOGLE_ACCESS_TOKEN");
        run_products(&ctx, &config, StaticTokenProvider::new(token)).await?;
    } else if let Some(path) = &config.service_account_path {
        let provider = Arc::new(ServiceAccountTokenProvider::from_file(&ctx, path).await?);
        info!("loaded service account {}", provider.key().client_email);
        run_products(&ctx, &config, provider).await?;
    } else {
        warn!("neither GOOGLE_ACCESS_TOKEN nor GOOGLE_SERVICE_ACCOUNT_PATH is set, skipping");
    }
    run_oauth2(&ctx, &config).await?;

    Ok(())
}
