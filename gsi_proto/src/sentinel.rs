use crate::model::Item;

/// Item name the client uses for a slot that holds nothing.
pub const EMPTY_ITEM_NAME: &str = "empty";

/// Collapse the placeholder item into an empty slot.
///
/// An omitted key already arrives here as `None`, so both encodings of
/// "nothing in this slot" leave as `None`.
pub fn normalize_slot(item: Option<Item>) -> Option<Item> {
    item.filter(|item| item.name != EMPTY_ITEM_NAME)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn named(name: &str) -> Item {
        Item {
            name: name.to_string(),
            ..Item::default()
        }
    }

    #[test]
    fn placeholder_becomes_absent() {
        assert_eq!(normalize_slot(Some(named(EMPTY_ITEM_NAME))), None);
    }

    #[test]
    fn omitted_stays_absent() {
        assert_eq!(normalize_slot(None), None);
    }

    #[test]
    fn real_items_pass_through() {
        let blink = named("item_blink");
        assert_eq!(normalize_slot(Some(blink.clone())), Some(blink));
    }

    #[test]
    fn match_is_exact() {
        assert!(normalize_slot(Some(named("Empty"))).is_some());
        assert!(normalize_slot(Some(named(""))).is_some());
    }
}
