// Integration tests module

mod integration {
    mod dashboard_flow_test;
    mod report_export_test;
}
