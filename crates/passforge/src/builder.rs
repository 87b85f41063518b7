//! Pass description model and bundle construction.
//!
//! [`PassBuilder`] turns a [`PassDescription`] into final archive
//! bytes: document JSON and image members first, then the manifest
//! over exactly those members, then (when credentials are present) a
//! detached signature over the frozen manifest, sealed into a
//! stored-only zip. The signature member is always the last one
//! added; nothing is ever appended after it.

use base64::Engine;
use base64::engine::general_purpose::{STANDARD, URL_SAFE_NO_PAD};
use getrandom::fill as fill_random;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::archive::{ArchiveMember, assemble};
use crate::assets::{DEFAULT_ICON, DEFAULT_LOGO};
use crate::color;
use crate::error::PassError;
use crate::kind::{FieldGroup, PassKind};
use crate::manifest::build_manifest;
use crate::signing::SigningCredentials;

pub(crate) const MANIFEST_PATH: &str = "manifest.json";
pub(crate) const SIGNATURE_PATH: &str = "signature";
pub(crate) const DOCUMENT_PATH: &str = "pass.json";

const DEFAULT_BACKGROUND: &str = "#1a1a2e";
const DEFAULT_FOREGROUND: &str = "#ffffff";
const DEFAULT_LABEL: &str = "#bbbbbb";

const DEMO_PASS_TYPE_IDENTIFIER: &str = "pass.com.example.passforge.demo";
const DEMO_TEAM_IDENTIFIER: &str = "DEMO000000";

/// Barcode payload encodings understood by wallet clients.
#[derive(Clone, Copy, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
pub enum BarcodeFormat {
    #[serde(rename = "PKBarcodeFormatPDF417")]
    Pdf417,
    #[serde(rename = "PKBarcodeFormatAztec")]
    Aztec,
    #[serde(rename = "PKBarcodeFormatCode128")]
    Code128,
    #[default]
    #[serde(rename = "PKBarcodeFormatQR")]
    #[serde(other)]
    Qr,
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub enum TextAlignment {
    #[serde(rename = "PKTextAlignmentLeft")]
    Left,
    #[serde(rename = "PKTextAlignmentCenter")]
    Center,
    #[serde(rename = "PKTextAlignmentRight")]
    Right,
    #[serde(rename = "PKTextAlignmentNatural")]
    Natural,
}

/// One labeled value inside a field group. Key uniqueness within a
/// group is the caller's responsibility.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PassField {
    pub key: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_alignment: Option<TextAlignment>,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_text: Option<String>,
}

/// Incoming pass description, immutable once received.
///
/// Wire names are camelCase to match the HTTP payload. The only
/// mandatory business field is `barcodeData`; everything else has a
/// workable default.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PassDescription {
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub background_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub foreground_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_text: Option<String>,

    #[serde(default)]
    pub barcode_data: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_format: Option<BarcodeFormat>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub barcode_alt_text: Option<String>,

    #[serde(default)]
    pub pass_type: PassKind,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub header_fields: Vec<PassField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub primary_fields: Vec<PassField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub secondary_fields: Vec<PassField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub auxiliary_fields: Vec<PassField>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub back_fields: Vec<PassField>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strip: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub relevant_date: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
}

impl PassDescription {
    /// Reject descriptions missing the one mandatory business field.
    /// Runs before any document or archive work.
    pub fn validate(&self) -> Result<(), PassError> {
        if self.barcode_data.is_empty() {
            return Err(PassError::validation("Barcode data is required"));
        }
        Ok(())
    }
}

/// Identifiers stamped into signed documents; resolved from service
/// configuration. Unsigned demo documents use fixed demo values.
#[derive(Clone, Debug)]
pub struct PassIdentifiers {
    pub pass_type_identifier: String,
    pub team_identifier: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Barcode {
    format: BarcodeFormat,
    message: String,
    message_encoding: &'static str,
    alt_text: String,
}

#[derive(Default, Serialize)]
#[serde(rename_all = "camelCase")]
struct PassStructure {
    #[serde(skip_serializing_if = "Option::is_none")]
    transit_type: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    header_fields: Option<Vec<PassField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    primary_fields: Option<Vec<PassField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    secondary_fields: Option<Vec<PassField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    auxiliary_fields: Option<Vec<PassField>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    back_fields: Option<Vec<PassField>>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PassDocument {
    format_version: u32,
    pass_type_identifier: String,
    team_identifier: String,
    organization_name: String,
    description: String,
    serial_number: String,
    background_color: String,
    foreground_color: String,
    label_color: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    logo_text: Option<String>,
    barcodes: Vec<Barcode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    expiration_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    relevant_date: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    locations: Vec<Location>,
}

/// Builds final pass archive bytes from a description.
pub struct PassBuilder<'a> {
    desc: &'a PassDescription,
    signing: Option<(&'a SigningCredentials, PassIdentifiers)>,
}

impl<'a> PassBuilder<'a> {
    pub fn new(desc: &'a PassDescription) -> Self {
        Self {
            desc,
            signing: None,
        }
    }

    /// Sign the manifest with `credentials` and stamp `identifiers`
    /// into the document. Without this the builder emits an unsigned
    /// demo pass; a signing failure never falls back to that path.
    pub fn with_signing(
        mut self,
        credentials: &'a SigningCredentials,
        identifiers: PassIdentifiers,
    ) -> Self {
        self.signing = Some((credentials, identifiers));
        self
    }

    pub fn build(self) -> Result<Vec<u8>, PassError> {
        self.desc.validate()?;

        let serial = new_serial()?;
        let document = build_document(self.desc, &serial, self.signing.as_ref().map(|(_, i)| i))?;
        let document_bytes = serde_json::to_vec_pretty(&document)?;

        let mut members = vec![ArchiveMember::new(DOCUMENT_PATH, document_bytes)?];
        members.extend(image_members(self.desc)?);

        // Manifest covers exactly the members assembled so far; it is
        // frozen before the signature is computed.
        let manifest = build_manifest(&members);
        let manifest_bytes = manifest.to_json_bytes()?;

        let signature = match &self.signing {
            Some((credentials, _)) => Some(credentials.sign_detached(&manifest_bytes)?),
            None => None,
        };

        members.push(ArchiveMember::new(MANIFEST_PATH, manifest_bytes)?);
        if let Some(signature) = signature {
            members.push(ArchiveMember::new(SIGNATURE_PATH, signature)?);
        }

        assemble(&members)
    }
}

fn build_document(
    desc: &PassDescription,
    serial: &str,
    identifiers: Option<&PassIdentifiers>,
) -> Result<JsonValue, PassError> {
    let (pass_type_identifier, team_identifier, fallback_description) = match identifiers {
        Some(ids) => (
            ids.pass_type_identifier.clone(),
            ids.team_identifier.clone(),
            "Digital Pass",
        ),
        None => (
            DEMO_PASS_TYPE_IDENTIFIER.to_string(),
            DEMO_TEAM_IDENTIFIER.to_string(),
            "Digital Pass (Demo)",
        ),
    };

    let organization_name = non_empty(&desc.title)
        .unwrap_or("Passforge")
        .to_string();
    let description = desc
        .description
        .as_deref()
        .and_then(non_empty)
        .or_else(|| non_empty(&desc.title))
        .unwrap_or(fallback_description)
        .to_string();
    let logo_text = desc
        .logo_text
        .clone()
        .or_else(|| non_empty(&desc.title).map(str::to_string));

    let barcode = Barcode {
        format: desc.barcode_format.unwrap_or_default(),
        message: desc.barcode_data.clone(),
        message_encoding: "iso-8859-1",
        alt_text: desc
            .barcode_alt_text
            .clone()
            .unwrap_or_else(|| desc.barcode_data.clone()),
    };

    let document = PassDocument {
        format_version: 1,
        pass_type_identifier,
        team_identifier,
        organization_name,
        description,
        serial_number: serial.to_string(),
        background_color: normalize_or_default(desc.background_color.as_deref(), DEFAULT_BACKGROUND),
        foreground_color: normalize_or_default(desc.foreground_color.as_deref(), DEFAULT_FOREGROUND),
        label_color: normalize_or_default(desc.label_color.as_deref(), DEFAULT_LABEL),
        logo_text,
        barcodes: vec![barcode],
        expiration_date: desc.expiration_date.clone(),
        relevant_date: desc.relevant_date.clone(),
        locations: desc.locations.clone(),
    };

    let mut value = serde_json::to_value(&document)?;
    let structure = serde_json::to_value(build_structure(desc))?;
    value
        .as_object_mut()
        .expect("pass document serializes to an object")
        .insert(desc.pass_type.json_key().to_string(), structure);
    Ok(value)
}

/// Assemble the type-specific field structure by iterating the
/// kind's layout table. Groups outside the layout are dropped even
/// when the caller supplied them.
fn build_structure(desc: &PassDescription) -> PassStructure {
    let mut structure = PassStructure {
        transit_type: desc.pass_type.transit_type(),
        ..PassStructure::default()
    };

    for group in desc.pass_type.layout() {
        match group {
            FieldGroup::Header => {
                structure.header_fields = non_empty_fields(&desc.header_fields);
            }
            FieldGroup::Primary => {
                structure.primary_fields =
                    non_empty_fields(&desc.primary_fields).or_else(|| synthesized_primary(desc));
            }
            FieldGroup::Secondary => {
                structure.secondary_fields = non_empty_fields(&desc.secondary_fields);
            }
            FieldGroup::Auxiliary => {
                structure.auxiliary_fields = non_empty_fields(&desc.auxiliary_fields);
            }
            FieldGroup::Back => {
                structure.back_fields = non_empty_fields(&desc.back_fields);
            }
        }
    }

    structure
}

/// Without explicit primary fields, a titled pass still gets one
/// primary field carrying the title, labeled with the subtitle.
fn synthesized_primary(desc: &PassDescription) -> Option<Vec<PassField>> {
    non_empty(&desc.title)?;
    Some(vec![PassField {
        key: "title".to_string(),
        label: Some(desc.subtitle.clone().unwrap_or_default()),
        value: desc.title.clone(),
        text_alignment: None,
    }])
}

fn image_members(desc: &PassDescription) -> Result<Vec<ArchiveMember>, PassError> {
    let icon = decode_image(desc.icon.as_deref(), "icon")?.unwrap_or_else(|| DEFAULT_ICON.clone());
    let logo = decode_image(desc.logo.as_deref(), "logo")?.unwrap_or_else(|| DEFAULT_LOGO.clone());

    let mut members = vec![
        ArchiveMember::new("icon.png", icon.clone())?,
        ArchiveMember::new("icon@2x.png", icon)?,
        ArchiveMember::new("logo.png", logo.clone())?,
        ArchiveMember::new("logo@2x.png", logo)?,
    ];

    if let Some(thumbnail) = decode_image(desc.thumbnail.as_deref(), "thumbnail")? {
        members.push(ArchiveMember::new("thumbnail.png", thumbnail.clone())?);
        members.push(ArchiveMember::new("thumbnail@2x.png", thumbnail)?);
    }
    if let Some(strip) = decode_image(desc.strip.as_deref(), "strip")? {
        members.push(ArchiveMember::new("strip.png", strip.clone())?);
        members.push(ArchiveMember::new("strip@2x.png", strip)?);
    }

    Ok(members)
}

fn decode_image(encoded: Option<&str>, name: &str) -> Result<Option<Vec<u8>>, PassError> {
    match encoded {
        Some(data) => STANDARD
            .decode(data)
            .map(Some)
            .map_err(|_| PassError::validation(format!("invalid base64 data in {name} image"))),
        None => Ok(None),
    }
}

fn normalize_or_default(value: Option<&str>, default: &str) -> String {
    color::normalize(value.unwrap_or(default))
}

fn non_empty(value: &str) -> Option<&str> {
    if value.trim().is_empty() {
        None
    } else {
        Some(value)
    }
}

fn non_empty_fields(fields: &[PassField]) -> Option<Vec<PassField>> {
    if fields.is_empty() {
        None
    } else {
        Some(fields.to_vec())
    }
}

/// Fresh opaque serial number: 12 random bytes, url-safe encoded to
/// 16 chars. Unique per process lifetime, not security-sensitive.
pub fn new_serial() -> Result<String, PassError> {
    random_token(12)
}

/// Short share id for one-time download links: 7 random bytes, 10
/// chars encoded.
pub fn new_share_id() -> Result<String, PassError> {
    random_token(7)
}

fn random_token(len: usize) -> Result<String, PassError> {
    let mut raw = vec![0u8; len];
    fill_random(&mut raw).map_err(|err| PassError::Random(err.to_string()))?;
    Ok(URL_SAFE_NO_PAD.encode(raw))
}
