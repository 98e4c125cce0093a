//! Service-center activity data.

define_record! {
    /// Staffing, consultation and feedback figures of a service center.
    #[derive(Default)]
    ActivityData in "activity_data" {
        num_total_empl: Option<i32>,
        manager_name: Option<String>,
        num_managers: Option<i32>,
        has_admin_service_consalt: Option<bool>,
        has_phone_consalt: Option<bool>,
        has_online_consalt: Option<bool>,
        has_sms_inform: Option<bool>,
        has_online_inform: Option<bool>,
        num_feedback_total: Option<i32>,
        other_feedback: Option<String>,
        has_technical_room: Option<bool>,
    }
}
