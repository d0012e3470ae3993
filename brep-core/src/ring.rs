/// Edge-ring resolution: order a face's edges into a closed directed cycle
use crate::error::TopologyError;
use crate::model::Edge;

/// Chain the edges of face `face` into a ring.
///
/// The first listed edge seeds the ring in its stored direction. Each
/// following edge is the first unused one touching the previous edge's end,
/// reversed if needed so that it starts there. The result satisfies
/// `ring[i].end() == ring[i + 1].start()` and `ring[last].end() == ring[0].start()`.
pub fn resolve_ring(face: usize, edges: &[Edge]) -> Result<Vec<Edge>, TopologyError> {
    let Some(&seed) = edges.first() else {
        return Err(TopologyError::EdgesNotConnected { face });
    };

    let mut ring = Vec::with_capacity(edges.len());
    ring.push(seed);

    while ring.len() < edges.len() {
        let pivot = ring[ring.len() - 1].end();

        let next = edges
            .iter()
            .find(|e| !ring.iter().any(|r| r.id == e.id) && e.contains(pivot));
        let Some(edge) = next else {
            tracing::warn!(face, vertex = pivot, "face edges not connected");
            return Err(TopologyError::EdgesNotConnected { face });
        };

        ring.push(if edge.start() == pivot {
            *edge
        } else {
            edge.reversed()
        });
    }

    if ring[0].start() != ring[ring.len() - 1].end() {
        tracing::warn!(face, "face edges do not close into a ring");
        return Err(TopologyError::RingNotClosed { face });
    }

    Ok(ring)
}
