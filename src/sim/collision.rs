//! Contact classification
//!
//! Turns a physics contact into a gameplay event. The player may appear on
//! either side of the pair; anything that does not involve the player, or
//! whose category is missing or unknown, is ignored.

use super::body::Category;
use super::entity::EntityId;
use super::physics::Contact;
use super::state::StateEvent;

/// Classify an unordered pair of category bitmasks
pub fn classify(category_a: u32, category_b: u32) -> Option<StateEvent> {
    let a = Category::from_bits(category_a);
    let b = Category::from_bits(category_b);

    let other = match (a, b) {
        (Some(Category::Bird), other) => other,
        (other, Some(Category::Bird)) => other,
        _ => return None,
    };

    match other? {
        Category::Pipe | Category::Grass => Some(StateEvent::FallDetected),
        Category::PipeBarrier => Some(StateEvent::OvercomeDetected),
        Category::Bird => None,
    }
}

/// Classify a contact and name the non-player entity involved
pub fn classify_contact(contact: &Contact) -> Option<(StateEvent, EntityId)> {
    let event = classify(contact.category_a, contact.category_b)?;
    let other = if Category::from_bits(contact.category_a) == Some(Category::Bird) {
        contact.b
    } else {
        contact.a
    };
    Some((event, other))
}
