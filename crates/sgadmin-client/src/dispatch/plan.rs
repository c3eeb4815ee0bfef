//! Splitting oversized identifier lists into request batches.

use std::num::NonZeroUsize;

use crate::params::{CHUNKABLE_PARAMETERS, ParameterSet, join_ids, split_ids};

/// One list parameter that exceeded the batch size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkedParameter {
    name: &'static str,
    batches: Vec<String>,
}

impl ChunkedParameter {
    /// Parameter name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Comma-joined batches, in original identifier order.
    #[must_use]
    pub fn batches(&self) -> &[String] {
        &self.batches
    }
}

/// How one logical call maps onto physical requests.
///
/// The server's identifier cap applies to all list parameters combined,
/// but each parameter is checked against the batch size on its own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkPlan {
    base: ParameterSet,
    chunked: Vec<ChunkedParameter>,
}

impl ChunkPlan {
    /// Plans a call, moving every oversized list out of the base set.
    #[must_use]
    pub fn build(parameters: &ParameterSet, chunk_size: NonZeroUsize) -> Self {
        let mut base = parameters.clone();
        let mut chunked = Vec::new();
        for name in CHUNKABLE_PARAMETERS {
            let Some(value) = parameters.get(name) else {
                continue;
            };
            let ids = split_ids(value);
            if ids.len() <= chunk_size.get() {
                continue;
            }
            base.remove(name);
            chunked.push(ChunkedParameter {
                name,
                batches: ids.chunks(chunk_size.get()).map(join_ids).collect(),
            });
        }
        Self { base, chunked }
    }

    /// Parameters shared by every request of the plan.
    #[must_use]
    pub const fn base(&self) -> &ParameterSet {
        &self.base
    }

    /// Oversized parameters, in loop-nesting order.
    #[must_use]
    pub fn chunked(&self) -> &[ChunkedParameter] {
        &self.chunked
    }

    /// Whether the call fits in one request.
    #[must_use]
    pub const fn is_single_request(&self) -> bool {
        self.chunked.is_empty()
    }

    /// Number of physical requests: the product of every batch count.
    #[must_use]
    pub fn request_count(&self) -> usize {
        self.chunked
            .iter()
            .map(|parameter| parameter.batches.len())
            .product()
    }

    /// Parameter sets for each physical request, in issue order.
    ///
    /// Batches combine as a cross product. The first chunked parameter
    /// varies slowest, so with two of them the first drives the outer
    /// loop.
    #[must_use]
    pub fn requests(&self) -> PlannedRequests<'_> {
        PlannedRequests {
            plan: self,
            cursor: Some(vec![0; self.chunked.len()]),
        }
    }
}

/// Iterator over the requests of a [`ChunkPlan`].
#[derive(Debug)]
pub struct PlannedRequests<'a> {
    plan: &'a ChunkPlan,
    cursor: Option<Vec<usize>>,
}

impl Iterator for PlannedRequests<'_> {
    type Item = ParameterSet;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;
        let mut request = self.plan.base.clone();
        for (parameter, index) in self.plan.chunked.iter().zip(cursor.iter()) {
            if let Some(batch) = parameter.batches.get(*index) {
                request.insert(parameter.name, batch.as_str());
            }
        }
        if !advance(cursor, &self.plan.chunked) {
            self.cursor = None;
        }
        Some(request)
    }
}

/// Steps the odometer, innermost position first. Returns `false` once
/// every combination has been produced.
fn advance(cursor: &mut [usize], chunked: &[ChunkedParameter]) -> bool {
    for (position, parameter) in cursor.iter_mut().zip(chunked).rev() {
        *position += 1;
        if *position < parameter.batches.len() {
            return true;
        }
        *position = 0;
    }
    false
}
