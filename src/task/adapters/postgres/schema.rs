//! Diesel schema for task persistence.

diesel::table! {
    /// Event task records.
    tasks (id) {
        /// Internal task identifier.
        id -> Uuid,
        /// Owning event identifier.
        event_id -> Uuid,
        /// Task name.
        name -> Text,
        /// Optional description.
        description -> Nullable<Text>,
        /// Planning stage label.
        #[max_length = 50]
        stage -> Varchar,
        /// Priority label.
        #[max_length = 50]
        priority -> Varchar,
        /// Status label.
        #[max_length = 50]
        status -> Varchar,
        /// Assignee display name.
        assignee_name -> Nullable<Text>,
        /// Assignee email; null while unclaimed.
        assignee_email -> Nullable<Text>,
        /// Optional due date.
        due_date -> Nullable<Date>,
        /// Submitted solution text.
        solution_text -> Nullable<Text>,
        /// Submitted solution file references as a JSON array.
        solution_files -> Jsonb,
        /// Claim timestamp.
        claimed_at -> Nullable<Timestamptz>,
        /// Submission timestamp.
        submitted_at -> Nullable<Timestamptz>,
        /// Creation timestamp.
        created_at -> Timestamptz,
        /// Last update timestamp.
        updated_at -> Timestamptz,
    }
}
