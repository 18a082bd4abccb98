//! Fan-out of a frame to the members of one room.
//!
//! Delivery is best-effort per recipient: a member that is no longer open
//! is skipped, and a member whose queue rejects the frame is logged and
//! skipped. Neither aborts delivery to the rest of the room, and neither
//! closes the recipient; only its own transport does that.

use std::sync::Arc;

use super::{ConnectionKey, Frame, RoomId, RoomRegistry};

/// Outcome counts of a single broadcast.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryReport {
    /// Frames queued to open members.
    pub delivered: usize,
    /// Members observed as not open and skipped.
    pub skipped: usize,
    /// Members whose queue rejected the frame.
    pub failed: usize,
}

/// Delivers frames to room members through the [`RoomRegistry`].
#[derive(Debug, Clone)]
pub struct Broadcaster {
    registry: Arc<RoomRegistry>,
}

impl Broadcaster {
    /// Creates a broadcaster over `registry`.
    #[must_use]
    pub fn new(registry: Arc<RoomRegistry>) -> Self {
        Self { registry }
    }

    /// Sends `frame` to every member of `room` except `exclude`.
    ///
    /// Membership is snapshotted first; no lock is held while sending.
    pub async fn broadcast(
        &self,
        room: &RoomId,
        frame: &Frame,
        exclude: Option<ConnectionKey>,
    ) -> DeliveryReport {
        let mut report = DeliveryReport::default();
        for member in self.registry.members(room).await {
            if Some(member.key()) == exclude {
                continue;
            }
            if !member.is_open() {
                report.skipped += 1;
                continue;
            }
            match member.send(frame.clone()) {
                Ok(()) => report.delivered += 1,
                Err(err) if err.is_delivery_failure() => {
                    report.failed += 1;
                    tracing::debug!(%room, conn_id = %member.id(), error = %err, "dropping frame for member");
                }
                Err(err) => {
                    report.failed += 1;
                    tracing::warn!(%room, conn_id = %member.id(), error = %err, "unexpected send error");
                }
            }
        }
        report
    }
}
