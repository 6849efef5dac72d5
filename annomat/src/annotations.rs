//! Named annotation vectors attached to one axis
//!
//! An [`AnnotationSet`] is an insertion-ordered collection of `1 x n`
//! matrices, all sized to the length of the axis they describe. The first
//! registered vector carries the human-readable axis label ("Row Names" or
//! "Column Names").
//!
//! Registering or replacing a whole vector whose length differs from the
//! axis length is rejected. Only [`AnnotationSet::resize`], used when the
//! annotated axis itself grows or shrinks, changes vector lengths.

use annomat_core::{check_cell, validate_label, Cell, MatrixError, Result, StoreKind};
use hashbrown::HashMap;
use tracing::debug;

use crate::matrix::Matrix;
use crate::notify::{ChangeEvent, ListenerId, Listeners};

/// Ordered, name-keyed annotation vectors for one axis
#[derive(Debug, Default)]
pub struct AnnotationSet {
    axis_len: usize,
    names: Vec<String>,
    vectors: Vec<Matrix>,
    positions: HashMap<String, usize>,
    listeners: Listeners,
}

impl Clone for AnnotationSet {
    /// Deep copy of the vectors; listeners stay with the original
    fn clone(&self) -> Self {
        Self {
            axis_len: self.axis_len,
            names: self.names.clone(),
            vectors: self.vectors.clone(),
            positions: self.positions.clone(),
            listeners: Listeners::new(),
        }
    }
}

impl PartialEq for AnnotationSet {
    fn eq(&self, other: &Self) -> bool {
        self.axis_len == other.axis_len
            && self.names == other.names
            && self.vectors == other.vectors
    }
}

impl AnnotationSet {
    /// Create an empty set for an axis of `axis_len` entries
    pub fn new(axis_len: usize) -> Self {
        Self {
            axis_len,
            ..Self::default()
        }
    }

    /// Length every vector must have
    pub fn axis_len(&self) -> usize {
        self.axis_len
    }

    /// Number of registered vectors
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Whether no vector is registered
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in registration order
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Whether a vector is registered under `name`
    pub fn contains(&self, name: &str) -> bool {
        self.positions.contains_key(name)
    }

    /// Registration position of `name`
    pub fn position(&self, name: &str) -> Option<usize> {
        self.positions.get(name).copied()
    }

    /// Name at a registration position
    pub fn name_at(&self, position: usize) -> Option<&str> {
        self.names.get(position).map(String::as_str)
    }

    /// Backing vector by name
    pub fn get(&self, name: &str) -> Option<&Matrix> {
        self.position(name).and_then(|position| self.vectors.get(position))
    }

    /// Backing vector by registration position
    pub fn get_at(&self, position: usize) -> Option<&Matrix> {
        self.vectors.get(position)
    }

    /// `(name, vector)` pairs in registration order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Matrix)> {
        self.names
            .iter()
            .map(String::as_str)
            .zip(self.vectors.iter())
    }

    /// Register or replace a vector
    ///
    /// A `n x 1` column vector is accepted and stored transposed. Any other
    /// shape, or a length other than the axis length, is rejected.
    pub fn set_annotation(&mut self, name: &str, vector: Matrix) -> Result<()> {
        validate_label(name)?;
        let vector = match (vector.rows(), vector.cols()) {
            (1, cols) if cols == self.axis_len => vector,
            (rows, 1) if rows == self.axis_len => vector.transpose()?,
            (rows, cols) => {
                return Err(MatrixError::LengthMismatch {
                    name: name.to_string(),
                    expected: self.axis_len,
                    actual: if rows == 1 { cols } else { rows * cols },
                })
            }
        };

        match self.position(name) {
            Some(position) => {
                debug!(name, kind = %vector.kind(), "Replacing annotation");
                self.vectors[position] = vector;
            }
            None => {
                debug!(name, kind = %vector.kind(), len = self.axis_len, "Registering annotation");
                self.positions.insert(name.to_string(), self.names.len());
                self.names.push(name.to_string());
                self.vectors.push(vector);
            }
        }
        self.notify();
        Ok(())
    }

    /// Register or replace a numeric vector
    pub fn set_numbers(&mut self, name: &str, values: impl IntoIterator<Item = f64>) -> Result<()> {
        let values: Vec<f64> = values.into_iter().collect();
        self.check_len(name, values.len())?;
        self.set_annotation(name, Matrix::from_numbers(values)?)
    }

    /// Register or replace a text vector
    pub fn set_texts<I, S>(&mut self, name: &str, values: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let vector = Matrix::from_texts(values)?;
        self.check_len(name, vector.cols())?;
        self.set_annotation(name, vector)
    }

    /// Register an all-null vector of the given storage kind
    pub fn add_empty(&mut self, name: &str, kind: StoreKind) -> Result<()> {
        let vector = Matrix::new(kind, 1, self.axis_len)?;
        self.set_annotation(name, vector)
    }

    fn check_len(&self, name: &str, actual: usize) -> Result<()> {
        if actual != self.axis_len {
            return Err(MatrixError::LengthMismatch {
                name: name.to_string(),
                expected: self.axis_len,
                actual,
            });
        }
        Ok(())
    }

    fn require(&self, name: &str) -> Result<usize> {
        self.position(name)
            .ok_or_else(|| MatrixError::UnknownAnnotation(name.to_string()))
    }

    fn vector_mut(&mut self, position: usize) -> Result<&mut Matrix> {
        self.vectors
            .get_mut(position)
            .ok_or_else(|| MatrixError::UnknownAnnotation(format!("#{position}")))
    }

    /// Value of one entry by name
    pub fn value(&self, name: &str, index: usize) -> Option<Cell> {
        self.get(name).and_then(|vector| vector.cell(0, index))
    }

    /// Value of one entry by registration position
    pub fn value_at(&self, position: usize, index: usize) -> Option<Cell> {
        self.get_at(position).and_then(|vector| vector.cell(0, index))
    }

    /// Write one entry by name and notify
    ///
    /// The cell keeps its own type where the vector's storage allows it.
    pub fn set_value(&mut self, name: &str, index: usize, value: &Cell) -> Result<()> {
        let position = self.require(name)?;
        self.set_at(position, index, value)
    }

    /// Write one entry by registration position and notify
    pub fn set_at(&mut self, position: usize, index: usize, value: &Cell) -> Result<()> {
        self.update_at(position, index, value)?;
        self.notify();
        Ok(())
    }

    /// Write one entry by registration position without notifying
    pub fn update_at(&mut self, position: usize, index: usize, value: &Cell) -> Result<()> {
        check_cell(0, index, 1, self.axis_len)?;
        self.vector_mut(position)?.put_cell(0, index, value)
    }

    /// Text of every entry of a vector, null entries as empty strings
    pub fn texts(&self, name: &str) -> Option<Vec<String>> {
        self.position(name).and_then(|position| self.texts_at(position))
    }

    /// Text of every entry of the vector at a registration position
    pub fn texts_at(&self, position: usize) -> Option<Vec<String>> {
        self.get_at(position).map(|vector| {
            vector
                .row_cells(0)
                .map(|cell| cell.to_text().unwrap_or_default())
                .collect()
        })
    }

    /// Numeric value of every entry of a vector
    pub fn numbers(&self, name: &str) -> Option<Vec<Option<f64>>> {
        self.get(name).map(|vector| {
            (0..vector.cols())
                .map(|index| vector.number(0, index))
                .collect()
        })
    }

    /// Rename a vector, keeping its position
    pub fn rename(&mut self, from: &str, to: &str) -> Result<()> {
        let position = self.require(from)?;
        if from == to {
            return Ok(());
        }
        validate_label(to)?;
        if self.contains(to) {
            return Err(MatrixError::DuplicateAnnotation(to.to_string()));
        }
        debug!(from, to, "Renaming annotation");
        self.positions.remove(from);
        self.positions.insert(to.to_string(), position);
        self.names[position] = to.to_string();
        self.notify();
        Ok(())
    }

    /// Remove a vector and return it
    pub fn remove(&mut self, name: &str) -> Result<Matrix> {
        let position = self.require(name)?;
        self.names.remove(position);
        let vector = self.vectors.remove(position);
        self.positions = self
            .names
            .iter()
            .enumerate()
            .map(|(position, name)| (name.clone(), position))
            .collect();
        debug!(name, remaining = self.names.len(), "Removed annotation");
        self.notify();
        Ok(vector)
    }

    /// New set holding the entries at `indices`, in that order
    ///
    /// Every vector keeps its storage kind. Indices past the axis length
    /// yield null entries.
    pub fn select(&self, indices: &[usize]) -> Result<AnnotationSet> {
        let mut out = AnnotationSet::new(indices.len());
        for (name, vector) in self.iter() {
            let mut selected = vector.of_same_type(1, indices.len())?;
            for (target, &index) in indices.iter().enumerate() {
                if let Some(cell) = vector.cell(0, index) {
                    selected.put_cell(0, target, &cell)?;
                }
            }
            out.positions.insert(name.to_string(), out.names.len());
            out.names.push(name.to_string());
            out.vectors.push(selected);
        }
        Ok(out)
    }

    /// Change the axis length, padding with nulls or truncating
    pub fn resize(&mut self, axis_len: usize) -> Result<()> {
        if axis_len == self.axis_len {
            return Ok(());
        }
        debug!(from = self.axis_len, to = axis_len, count = self.len(), "Resizing annotations");
        for vector in &mut self.vectors {
            vector.resize(1, axis_len)?;
        }
        self.axis_len = axis_len;
        self.notify();
        Ok(())
    }

    /// Fire an [`ChangeEvent::Annotations`] event
    pub fn notify(&mut self) {
        let event = ChangeEvent::Annotations { count: self.len() };
        self.listeners.notify(&event);
    }

    /// Register a change callback
    pub fn subscribe<F>(&mut self, callback: F) -> ListenerId
    where
        F: FnMut(&ChangeEvent) + 'static,
    {
        self.listeners.subscribe(callback)
    }

    /// Remove a change callback
    pub fn unsubscribe(&mut self, id: ListenerId) -> bool {
        self.listeners.unsubscribe(id)
    }
}
