/// Generic troubleshooting steps attached to every failed-run diagnosis.
pub const RECOMMENDATIONS: [&str; 10] = [
    "Check IAM role permissions for S3 access and CloudWatch Logs",
    "Verify container images are accessible from the HealthOmics service",
    "Ensure input files exist and are accessible by the run's IAM role",
    "Check for syntax errors in workflow definition",
    "Verify parameter values match the expected types and formats",
    "Review manifest logs for resource allocation and utilization issues",
    "Check task logs for application-specific error messages",
    "Verify that output S3 locations are writable by the run's IAM role",
    "Consider increasing resource allocations if tasks failed due to memory/CPU limits",
    "Check for network connectivity issues if tasks failed during data transfer",
];

pub fn recommendations() -> Vec<String> {
    RECOMMENDATIONS.iter().map(|s| s.to_string()).collect()
}
