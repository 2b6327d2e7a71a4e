//! Order domain - purchase attempts and their payment lifecycle.
//!
//! Order status moves forward only (`pending` to `paid` to `processing` to
//! `completed`, with `cancelled` reachable from any non-terminal state). The
//! only transition this backend drives itself is `pending` to `paid`, applied by
//! the webhook reconciler; it is idempotent because the processor may deliver
//! the same event more than once.

mod errors;
mod order;
mod status;

pub use errors::OrderError;
pub use order::Order;
pub use status::OrderStatus;
