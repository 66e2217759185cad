//! Caller-side session: selection by sequence number, step text parsing,
//! and an append-only point cloud of discretized entities.

use tracing::info;

use crate::discretize::{DiscretizeEntity, DiscretizeOptions, StepParameters};
use crate::error::{DiscretizationError, Result};
use crate::math::{Point3, Vector3};
use crate::topology::{EntityRef, EntityStore, SequenceNumber};

/// Parses the U and V step fields as typed by a user.
///
/// Surrounding whitespace is ignored; anything `f64` parsing accepts is a
/// number, including exponents.
///
/// # Errors
///
/// Returns [`DiscretizationError::InvalidNumberFormat`] if a field is not a
/// number, and [`DiscretizationError::InvalidParameter`] if it is not a
/// finite value greater than zero.
pub fn parse_steps(u_text: &str, v_text: &str) -> Result<StepParameters> {
    let du = parse_field("U", u_text)?;
    let dv = parse_field("V", v_text)?;
    StepParameters::new(du, dv).map_err(Into::into)
}

fn parse_field(field: &'static str, text: &str) -> std::result::Result<f64, DiscretizationError> {
    text.trim()
        .parse::<f64>()
        .map_err(|_| DiscretizationError::InvalidNumberFormat {
            field,
            text: text.to_owned(),
        })
}

/// One discretized entity in a [`PointCloud`].
#[derive(Debug, Clone, PartialEq)]
pub struct CloudEntry {
    /// Sequence number of the discretized entity.
    pub sequence: SequenceNumber,
    /// Sampled positions.
    pub points: Vec<Point3>,
    /// Unit normals, parallel to `points`.
    pub normals: Vec<Vector3>,
}

/// Accumulated discretization record.
///
/// Entries are kept in the order they were added. The same entity may appear
/// more than once.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointCloud {
    entries: Vec<CloudEntry>,
}

impl PointCloud {
    /// Creates an empty cloud.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends the result of one discretization.
    pub fn push(&mut self, sequence: SequenceNumber, points: Vec<Point3>, normals: Vec<Vector3>) {
        self.entries.push(CloudEntry {
            sequence,
            points,
            normals,
        });
    }

    /// All entries in insertion order.
    #[must_use]
    pub fn entries(&self) -> &[CloudEntry] {
        &self.entries
    }

    /// Sequence numbers of the discretized entities, one per entry.
    pub fn face_sequence_numbers(&self) -> impl Iterator<Item = SequenceNumber> + '_ {
        self.entries.iter().map(|e| e.sequence)
    }

    /// Point list of each entry.
    pub fn point_sets(&self) -> impl Iterator<Item = &[Point3]> {
        self.entries.iter().map(|e| e.points.as_slice())
    }

    /// Normal list of each entry.
    pub fn normal_sets(&self) -> impl Iterator<Item = &[Vector3]> {
        self.entries.iter().map(|e| e.normals.as_slice())
    }

    /// Every point of every entry, in insertion order.
    pub fn points(&self) -> impl Iterator<Item = &Point3> {
        self.entries.iter().flat_map(|e| &e.points)
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Total number of points across entries.
    #[must_use]
    pub fn point_count(&self) -> usize {
        self.entries.iter().map(|e| e.points.len()).sum()
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// A loaded model with a current selection and the cloud built from it.
pub struct Session {
    store: EntityStore,
    cloud: PointCloud,
    selection: Option<(EntityRef, SequenceNumber)>,
    options: DiscretizeOptions,
}

impl Session {
    /// Starts a session over `store` with an empty cloud and no selection.
    #[must_use]
    pub fn new(store: EntityStore) -> Self {
        Self {
            store,
            cloud: PointCloud::new(),
            selection: None,
            options: DiscretizeOptions::default(),
        }
    }

    /// Replaces the discretization options.
    #[must_use]
    pub fn with_options(mut self, options: DiscretizeOptions) -> Self {
        self.options = options;
        self
    }

    /// The loaded model.
    #[must_use]
    pub fn store(&self) -> &EntityStore {
        &self.store
    }

    /// The accumulated point cloud.
    #[must_use]
    pub fn cloud(&self) -> &PointCloud {
        &self.cloud
    }

    /// Empties the cloud; the selection is kept.
    pub fn clear_cloud(&mut self) {
        self.cloud.clear();
    }

    /// The selected entity and its sequence number, if any.
    #[must_use]
    pub fn selection(&self) -> Option<(EntityRef, SequenceNumber)> {
        self.selection
    }

    /// Selects `entity`, returning its sequence number.
    ///
    /// # Errors
    ///
    /// Returns an error if the entity is not listed in the store, in which
    /// case the previous selection is kept.
    pub fn select(&mut self, entity: EntityRef) -> Result<SequenceNumber> {
        let seq = self.store.sequence_number(entity)?;
        self.selection = Some((entity, seq));
        Ok(seq)
    }

    /// Selects the entity with sequence number `seq`.
    ///
    /// # Errors
    ///
    /// Returns an error if no entity has that number.
    pub fn select_sequence(&mut self, seq: SequenceNumber) -> Result<EntityRef> {
        let entity = self.store.entity(seq)?;
        self.selection = Some((entity, seq));
        Ok(entity)
    }

    /// Discretizes the selection with step text `u_text` and `v_text` and
    /// appends the result to the cloud.
    ///
    /// The cloud is left untouched when this fails.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is selected, the step text is invalid, or
    /// the discretization fails.
    pub fn discretize_selection(&mut self, u_text: &str, v_text: &str) -> Result<&CloudEntry> {
        let steps = parse_steps(u_text, v_text)?;
        let (entity, sequence) = self.selection.ok_or_else(|| {
            DiscretizationError::InvalidEntity("no entity is selected".into())
        })?;

        let (points, normals) = DiscretizeEntity::new(entity, steps)
            .with_options(self.options)
            .execute(&self.store)?
            .into_parts();
        info!(%sequence, points = points.len(), "appended to point cloud");
        self.cloud.push(sequence, points, normals);

        let last = self.cloud.entries.len() - 1;
        Ok(&self.cloud.entries[last])
    }
}
