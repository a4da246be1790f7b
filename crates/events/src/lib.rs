//! Domain events for the advisor service.

pub mod bus;

pub use bus::{
    EventBus, ProcessEvent, ALERT_CREATED, ALERT_RESOLVED, READING_RECORDED,
    RECOMMENDATION_GENERATED,
};
