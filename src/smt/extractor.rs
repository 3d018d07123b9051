//! Concrete table extraction from a solver model

use super::encoder::EncodedEmbedding;
use super::SmtError;
use crate::lattice::ProblemInstance;
use z3::ast::{Dynamic, Int};
use z3::Model;

/// Concrete tables read out of a sat model, before independent verification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelTables {
    pub f: Vec<i64>,
    pub g: Vec<i64>,
}

/// Reads concrete f and g tables out of a model.
///
/// g is an infinite-domain array term inside the solver, so the only way to
/// materialize its finite table is one lookup-at-k evaluation per point
/// k in [0, p). Model completion fills points the constraints never touched.
pub struct ModelExtractor;

impl ModelExtractor {
    /// Evaluate every f_i and every g[k] to a concrete integer.
    ///
    /// Any evaluation that does not reduce is an
    /// [`SmtError::ExtractionFault`] naming the term, never a silent
    /// default.
    pub fn extract(
        model: &Model,
        encoded: &EncodedEmbedding,
        instance: &ProblemInstance,
    ) -> Result<ModelTables, SmtError> {
        let mut f = Vec::with_capacity(encoded.f_vars.len());
        for (i, fi) in encoded.f_vars.iter().enumerate() {
            let value = model
                .eval(fi, true)
                .and_then(|v| v.as_i64())
                .ok_or_else(|| SmtError::ExtractionFault {
                    term: format!("f_{}", i),
                })?;
            f.push(value);
        }

        let mut g = Vec::with_capacity(instance.p() as usize);
        for k in 0..instance.p() {
            let lookup = encoded
                .g
                .select(&Dynamic::from_ast(&Int::from_i64(k)))
                .as_int()
                .ok_or_else(|| SmtError::MalformedTerm {
                    term: format!("g[{}]", k),
                })?;
            let value = model
                .eval(&lookup, true)
                .and_then(|v| v.as_i64())
                .ok_or_else(|| SmtError::ExtractionFault {
                    term: format!("g[{}]", k),
                })?;
            g.push(value);
        }

        Ok(ModelTables { f, g })
    }
}
