//! Diesel schema for task and comment persistence.

diesel::table! {
    /// Account-scoped task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning account identifier.
        account_id -> Uuid,
        /// Task title.
        #[max_length = 255]
        title -> Varchar,
        /// Task description.
        description -> Text,
        /// Soft-delete flag.
        active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::table! {
    /// Task-scoped comment records with their author.
    comments (id) {
        /// Internal comment identifier.
        id -> Uuid,
        /// The commented task.
        task_id -> Uuid,
        /// The author's account identifier.
        account_id -> Uuid,
        /// Comment content.
        content -> Text,
        /// Soft-delete flag.
        active -> Bool,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}

diesel::allow_tables_to_appear_in_same_query!(tasks, comments);
