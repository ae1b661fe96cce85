//! GraphQL documents for the Shopify Admin API.

/// Create a draft order from a `DraftOrderInput`.
pub const DRAFT_ORDER_CREATE: &str = r"
mutation DraftOrderCreate($input: DraftOrderInput!) {
  draftOrderCreate(input: $input) {
    draftOrder {
      id
    }
    userErrors {
      field
      message
    }
  }
}
";

/// Complete a draft order, turning it into a real order.
pub const DRAFT_ORDER_COMPLETE: &str = r"
mutation DraftOrderComplete($id: ID!) {
  draftOrderComplete(id: $id) {
    draftOrder {
      id
      order {
        id
        name
      }
    }
    userErrors {
      field
      message
    }
  }
}
";
