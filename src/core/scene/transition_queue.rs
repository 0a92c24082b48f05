//=========================================================================
// Transition Queue
//=========================================================================
//
// Queue for scene load requests.
//
// Scenes push requests here during updates. The scene manager drains the
// queue at the end of the tick, after the active scene has finished its
// frame.
//
//=========================================================================

//=== Internal Dependencies ===============================================

use super::{SceneId, SceneParams};

//=== SceneRequest ========================================================

/// A request to load `id` with the given parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneRequest {
    pub id: SceneId,
    pub params: SceneParams,
}

//=== TransitionQueue =====================================================

#[derive(Debug, Default)]
pub struct TransitionQueue {
    queue: Vec<SceneRequest>,
}

impl TransitionQueue {
    /// Creates a new empty transition queue.
    pub fn new() -> Self {
        Self { queue: Vec::new() }
    }

    /// Queues a scene load to be processed at the next tick boundary.
    pub fn request(&mut self, id: SceneId, params: SceneParams) {
        self.queue.push(SceneRequest { id, params });
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Takes all requests from the queue, leaving it empty.
    pub fn take(&mut self) -> Vec<SceneRequest> {
        std::mem::take(&mut self.queue)
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
