//! Participant registry.
//!
//! Holds the paired devices, their peer links and the last image each one
//! received. Every operation runs under a single lock, so registry
//! operations are linearizable with respect to each other. The lock is never
//! held across I/O: uploads write to disk first and only then call
//! [`Registry::record_image`].

use crate::error::{RegistryError, RegistryResult};
use chrono::{DateTime, Utc};
use frame_types::{DeviceToken, ImageInfo};
use std::collections::HashMap;
use tokio::sync::Mutex;

/// Maximum number of participants. A relay pairs exactly two devices.
pub const MAX_PARTICIPANTS: usize = 2;

/// An image handed from one participant to its peer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    /// Public reference returned by the media store.
    pub reference: String,
    /// Upload time.
    pub created_at: DateTime<Utc>,
    /// Set once a non-owning participant acknowledges the image.
    pub seen: bool,
}

impl Image {
    /// A fresh, unseen image stamped with the current time.
    pub fn new(reference: impl Into<String>) -> Self {
        Self {
            reference: reference.into(),
            created_at: Utc::now(),
            seen: false,
        }
    }
}

impl From<&Image> for ImageInfo {
    fn from(image: &Image) -> Self {
        Self {
            url: image.reference.clone(),
            date: image.created_at,
        }
    }
}

#[derive(Debug, Default)]
struct Participant {
    /// Last image this participant uploaded.
    last: Option<Image>,
    /// Paired peer, unset until a second participant registers.
    peer: Option<DeviceToken>,
}

/// Registry of paired participants.
#[derive(Debug)]
pub struct Registry {
    participants: Mutex<HashMap<DeviceToken, Participant>>,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

impl Registry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self {
            participants: Mutex::new(HashMap::with_capacity(MAX_PARTICIPANTS)),
        }
    }

    /// Issue a new identity and pair it with whoever is already registered.
    ///
    /// Fails with [`RegistryError::CapacityExceeded`] when both slots are
    /// taken; the registry is left untouched in that case.
    pub async fn issue_identity(&self) -> RegistryResult<DeviceToken> {
        let mut participants = self.participants.lock().await;

        if participants.len() >= MAX_PARTICIPANTS {
            tracing::warn!(
                "Identity rejected: registry full ({}/{})",
                participants.len(),
                MAX_PARTICIPANTS
            );
            return Err(RegistryError::CapacityExceeded {
                capacity: MAX_PARTICIPANTS,
            });
        }

        let mut token = DeviceToken::random();
        while participants.contains_key(&token) {
            token = DeviceToken::random();
        }

        participants.insert(token, Participant::default());
        relink(&mut participants);

        tracing::info!(
            "Issued identity {:?} ({}/{} slots, paired: {})",
            token,
            participants.len(),
            MAX_PARTICIPANTS,
            participants.len() == MAX_PARTICIPANTS
        );

        Ok(token)
    }

    /// The last image uploaded by the caller's peer.
    ///
    /// `Ok(None)` while unpaired or before the peer uploads anything.
    pub async fn peer_last_image(&self, token: &DeviceToken) -> RegistryResult<Option<Image>> {
        let participants = self.participants.lock().await;
        let me = lookup(&participants, token)?;

        Ok(me
            .peer
            .and_then(|peer| participants.get(&peer))
            .and_then(|peer| peer.last.clone()))
    }

    /// Replace the caller's last image. No history is kept.
    pub async fn record_image(&self, token: &DeviceToken, image: Image) -> RegistryResult<()> {
        let mut participants = self.participants.lock().await;
        let me = participants
            .get_mut(token)
            .ok_or(RegistryError::UnknownIdentity { token: *token })?;

        me.last = Some(Image {
            seen: false,
            ..image
        });

        tracing::debug!("Recorded image for {:?}", token);
        Ok(())
    }

    /// Whether the caller's own last image has been seen. False without one.
    pub async fn own_seen_status(&self, token: &DeviceToken) -> RegistryResult<bool> {
        let participants = self.participants.lock().await;
        let me = lookup(&participants, token)?;

        Ok(me.last.as_ref().is_some_and(|image| image.seen))
    }

    /// Mark the last image of every other participant as seen.
    ///
    /// The caller's own image is never touched.
    pub async fn mark_all_others_seen(&self, token: &DeviceToken) -> RegistryResult<()> {
        let mut participants = self.participants.lock().await;
        lookup(&participants, token)?;

        let mut marked = 0;
        for image in participants
            .iter_mut()
            .filter(|(other, _)| *other != token)
            .filter_map(|(_, participant)| participant.last.as_mut())
        {
            image.seen = true;
            marked += 1;
        }

        tracing::debug!("{:?} marked {} image(s) seen", token, marked);
        Ok(())
    }

    /// Whether the token belongs to a registered participant.
    pub async fn contains(&self, token: &DeviceToken) -> bool {
        self.participants.lock().await.contains_key(token)
    }

    /// The caller's peer, if paired.
    pub async fn peer_of(&self, token: &DeviceToken) -> RegistryResult<Option<DeviceToken>> {
        let participants = self.participants.lock().await;
        Ok(lookup(&participants, token)?.peer)
    }

    /// Number of registered participants.
    pub async fn len(&self) -> usize {
        self.participants.lock().await.len()
    }

    /// True if nobody has registered yet.
    pub async fn is_empty(&self) -> bool {
        self.participants.lock().await.is_empty()
    }

    /// Maximum number of participants.
    pub fn capacity(&self) -> usize {
        MAX_PARTICIPANTS
    }
}

fn lookup<'a>(
    participants: &'a HashMap<DeviceToken, Participant>,
    token: &DeviceToken,
) -> RegistryResult<&'a Participant> {
    participants
        .get(token)
        .ok_or(RegistryError::UnknownIdentity { token: *token })
}

/// Recompute peer links from scratch: each participant points at another
/// one, or at nobody when it is alone.
fn relink(participants: &mut HashMap<DeviceToken, Participant>) {
    let tokens: Vec<DeviceToken> = participants.keys().copied().collect();

    for (token, participant) in participants.iter_mut() {
        participant.peer = tokens.iter().copied().find(|other| other != token);
    }
}
