mod report_detail;

pub use report_detail::ReportDetail;
