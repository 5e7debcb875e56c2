use anyhow::Result;
use clap::Parser;
use gcp_vision_client::auth::ServiceAccountCredentials;
use gcp_vision_client::vision::{
    AnnotateImageResponse, Feature, FeatureType, VisionClient, VisionRequestItem,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "gcp-vision-client")]
#[command(about = "Annotate an image with the Google Cloud Vision API")]
struct CliArgs {
    /// Local image file or gs:// URI to annotate.
    #[arg(value_name = "IMAGE")]
    image: String,

    /// Service-account key file; defaults to $GOOGLE_APPLICATION_CREDENTIALS.
    #[arg(long)]
    credentials: Option<PathBuf>,

    /// Detection feature to request, e.g. LABEL_DETECTION. Repeatable;
    /// defaults to every detection type.
    #[arg(long = "feature", value_parser = parse_feature)]
    features: Vec<FeatureType>,

    /// Maximum results per requested feature.
    #[arg(long, default_value_t = Feature::DEFAULT_MAX_RESULTS)]
    max_results: u32,

    /// Language hint for text detection, e.g. "en". Repeatable.
    #[arg(long = "language-hint")]
    language_hints: Vec<String>,
}

fn parse_feature(input: &str) -> std::result::Result<FeatureType, String> {
    FeatureType::from_name(&input.to_uppercase())
        .ok_or_else(|| format!("Unknown feature '{}'. Expected e.g. LABEL_DETECTION", input))
}

fn build_item(args: &CliArgs) -> Result<VisionRequestItem> {
    let mut item = VisionRequestItem::new();

    if args.image.starts_with("gs://") {
        item.set_image_uri(&args.image);
    } else {
        let bytes = std::fs::read(&args.image)?;
        info!("Read {} bytes from {}", bytes.len(), args.image);
        item.set_image_bytes(bytes);
    }

    if args.features.is_empty() {
        item.request_all_features();
    } else {
        for feature_type in &args.features {
            item.add_feature(Feature::with_max_results(*feature_type, args.max_results));
        }
    }

    for language in &args.language_hints {
        item.add_language_hint(language);
    }

    Ok(item)
}

fn print_summary(response: &AnnotateImageResponse) {
    for label in &response.label_annotations {
        println!("label: {} ({:.2})", label.description, label.score);
    }
    for logo in &response.logo_annotations {
        println!("logo: {} ({:.2})", logo.description, logo.score);
    }
    for landmark in &response.landmark_annotations {
        println!("landmark: {} ({:.2})", landmark.description, landmark.score);
    }
    // Full detected text arrives as the first text annotation.
    if let Some(text) = response.text_annotations.first() {
        println!("text: {}", text.description.replace('\n', " / "));
    }
    for face in &response.face_annotations {
        println!(
            "face: joy={} sorrow={} anger={} surprise={} ({:.2})",
            face.joy_likelihood.name(),
            face.sorrow_likelihood.name(),
            face.anger_likelihood.name(),
            face.surprise_likelihood.name(),
            face.detection_confidence
        );
    }
    let safe_search = &response.safe_search_annotation;
    println!(
        "safe-search: adult={} spoof={} medical={} violence={} racy={}",
        safe_search.adult.name(),
        safe_search.spoof.name(),
        safe_search.medical.name(),
        safe_search.violence.name(),
        safe_search.racy.name()
    );
    for color_info in &response.image_properties_annotation.dominant_colors.colors {
        println!(
            "color: rgb({:.0}, {:.0}, {:.0}) fraction={:.3}",
            color_info.color.red,
            color_info.color.green,
            color_info.color.blue,
            color_info.pixel_fraction
        );
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gcp_vision_client=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    dotenvy::dotenv().ok();
    let args = CliArgs::parse();

    let credentials_path = match args.credentials.clone().or_else(|| {
        std::env::var("GOOGLE_APPLICATION_CREDENTIALS")
            .ok()
            .map(PathBuf::from)
    }) {
        Some(path) => path,
        None => {
            error!("No credentials given; pass --credentials or set GOOGLE_APPLICATION_CREDENTIALS");
            std::process::exit(1);
        }
    };

    let credentials = ServiceAccountCredentials::from_file(&credentials_path);
    if !credentials.is_valid() {
        error!(
            "Credentials file {} did not contain usable service-account credentials",
            credentials_path.display()
        );
        std::process::exit(1);
    }
    info!("Authenticating as {}", credentials.client_email());

    let item = build_item(&args)?;
    let client = VisionClient::new(credentials);

    match client.annotate(item).await {
        Ok(responses) => {
            for response in &responses {
                print_summary(response);
            }
            Ok(())
        }
        Err(e) => {
            error!("Annotation failed: {}", e);
            std::process::exit(1);
        }
    }
}
