//! Feature Vector Assembly

use crate::age::age_bucket;
use crate::input::{RawInput, Sex};
use crate::EncodeError;
use data_validator::{ValidationConfig, Validator};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Number of features in the vector
pub const FEATURE_DIMENSION: usize = 21;

/// Column names in training order
pub const FEATURE_NAMES: [&str; FEATURE_DIMENSION] = [
    "HighBP",
    "HighChol",
    "CholCheck",
    "BMI",
    "Smoker",
    "Stroke",
    "HeartDiseaseorAttack",
    "PhysActivity",
    "Fruits",
    "Veggies",
    "HvyAlcoholConsump",
    "AnyHealthcare",
    "NoDocbcCost",
    "GenHlth",
    "MentHlth",
    "PhysHlth",
    "DiffWalk",
    "Sex",
    "Age",
    "Education",
    "Income",
];

/// One position of the feature vector.
///
/// Discriminants are the column indices; the order must match the classifier's
/// training schema exactly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feature {
    HighBp = 0,
    HighChol,
    CholCheck,
    Bmi,
    Smoker,
    Stroke,
    HeartDiseaseOrAttack,
    PhysActivity,
    Fruits,
    Veggies,
    HvyAlcoholConsump,
    AnyHealthcare,
    NoDocBcCost,
    GenHlth,
    MentHlth,
    PhysHlth,
    DiffWalk,
    Sex,
    Age,
    Education,
    Income,
}

impl Feature {
    /// Every feature in column order
    pub const ALL: [Feature; FEATURE_DIMENSION] = [
        Feature::HighBp,
        Feature::HighChol,
        Feature::CholCheck,
        Feature::Bmi,
        Feature::Smoker,
        Feature::Stroke,
        Feature::HeartDiseaseOrAttack,
        Feature::PhysActivity,
        Feature::Fruits,
        Feature::Veggies,
        Feature::HvyAlcoholConsump,
        Feature::AnyHealthcare,
        Feature::NoDocBcCost,
        Feature::GenHlth,
        Feature::MentHlth,
        Feature::PhysHlth,
        Feature::DiffWalk,
        Feature::Sex,
        Feature::Age,
        Feature::Education,
        Feature::Income,
    ];

    /// Column index
    pub fn index(self) -> usize {
        self as usize
    }

    /// Training column name
    pub fn name(self) -> &'static str {
        FEATURE_NAMES[self.index()]
    }

    /// Whether the column holds a 0/1 indicator
    pub fn is_binary(self) -> bool {
        !matches!(
            self,
            Feature::Bmi
                | Feature::GenHlth
                | Feature::MentHlth
                | Feature::PhysHlth
                | Feature::Age
                | Feature::Education
                | Feature::Income
        )
    }
}

/// Feature vector for ML inference
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FeatureVector {
    values: [f64; FEATURE_DIMENSION],
}

impl FeatureVector {
    /// Build a vector from raw column values already in training order
    pub fn from_slice(values: &[f64]) -> Result<Self, EncodeError> {
        let values: [f64; FEATURE_DIMENSION] =
            values.try_into().map_err(|_| EncodeError::Dimension {
                expected: FEATURE_DIMENSION,
                actual: values.len(),
            })?;
        Ok(Self { values })
    }

    /// Values in column order
    pub fn as_slice(&self) -> &[f64] {
        &self.values
    }

    /// Value of a single feature
    pub fn get(&self, feature: Feature) -> f64 {
        self.values[feature.index()]
    }

    /// `(column name, value)` pairs in column order
    pub fn named(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        FEATURE_NAMES.iter().copied().zip(self.values.iter().copied())
    }
}

fn indicator(flag: bool) -> f64 {
    if flag {
        1.0
    } else {
        0.0
    }
}

impl RawInput {
    /// Encoded value of one feature, without validation
    fn feature_value(&self, feature: Feature) -> f64 {
        match feature {
            Feature::HighBp => indicator(self.high_bp),
            Feature::HighChol => indicator(self.high_chol),
            Feature::CholCheck => indicator(self.chol_check),
            Feature::Bmi => self.bmi,
            Feature::Smoker => indicator(self.smoker),
            Feature::Stroke => indicator(self.stroke),
            Feature::HeartDiseaseOrAttack => indicator(self.heart_disease),
            Feature::PhysActivity => indicator(self.phys_activity),
            Feature::Fruits => indicator(self.fruits),
            Feature::Veggies => indicator(self.veggies),
            Feature::HvyAlcoholConsump => indicator(self.hvy_alcohol),
            Feature::AnyHealthcare => indicator(self.any_healthcare),
            Feature::NoDocBcCost => indicator(self.no_doc_bc_cost),
            Feature::GenHlth => f64::from(self.gen_hlth),
            Feature::MentHlth => f64::from(self.ment_hlth_days),
            Feature::PhysHlth => f64::from(self.phys_hlth_days),
            Feature::DiffWalk => indicator(self.diff_walk),
            Feature::Sex => indicator(self.sex == Sex::Male),
            Feature::Age => f64::from(age_bucket(self.age)),
            Feature::Education => f64::from(self.education),
            Feature::Income => f64::from(self.income),
        }
    }
}

/// Encoder from questionnaire answers to the classifier's feature vector
pub struct FeatureEncoder {
    validator: Validator,
}

impl FeatureEncoder {
    /// Create an encoder enforcing the given field domains
    pub fn new(config: ValidationConfig) -> Self {
        Self {
            validator: Validator::new(config),
        }
    }

    /// Validate and encode one submission.
    ///
    /// Every out-of-domain field is reported; nothing is encoded unless all
    /// fields pass.
    pub fn encode(&self, raw: &RawInput) -> Result<FeatureVector, EncodeError> {
        raw.validate(&self.validator).into_result().map_err(|errors| {
            warn!("Rejected submission with {} invalid field(s)", errors.len());
            EncodeError::InvalidInput(errors)
        })?;

        let values = Feature::ALL.map(|feature| raw.feature_value(feature));
        debug!("Encoded feature vector: {:?}", values);

        Ok(FeatureVector { values })
    }

    /// Validator backing this encoder
    pub fn validator(&self) -> &Validator {
        &self.validator
    }
}

impl Default for FeatureEncoder {
    fn default() -> Self {
        Self::new(ValidationConfig::default())
    }
}
