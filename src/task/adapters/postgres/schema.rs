//! Diesel schema for task and notification persistence.

diesel::table! {
    /// Task records.
    tasks (id) {
        /// Task identifier.
        id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Optional long-form description.
        description -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Timestamptz>,
        /// Lifecycle status.
        #[max_length = 50]
        status -> Varchar,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Pending notification payloads, FIFO-ordered by `seq` within a queue.
    notifications (seq) {
        /// Monotonic position used for FIFO ordering.
        seq -> Int8,
        /// Name of the queue the payload belongs to.
        #[max_length = 255]
        queue -> Varchar,
        /// Serialized notification payload.
        payload -> Text,
        /// Enqueue timestamp.
        enqueued_at -> Timestamptz,
    }
}
