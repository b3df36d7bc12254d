//! 点名结果 CSV 报表

use std::collections::HashMap;

use crate::errors::{Result, TrainHubError};
use crate::models::roll_call::responses::RollCallResultResponse;

/// 每个学员一行，固定列之后每个科目一列（列名为科目编号），未报名留空
pub fn render_roll_call_csv(result: &RollCallResultResponse) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);

    let mut header = vec![
        "numerical_order".to_string(),
        "holy_name".to_string(),
        "full_name".to_string(),
        "email".to_string(),
        "completed".to_string(),
        "no_complete".to_string(),
        "absent".to_string(),
    ];
    header.extend(result.subjects.iter().map(|s| s.code.clone()));
    wtr.write_record(&header)?;

    for student in &result.students {
        let statuses: HashMap<i64, &'static str> = student
            .subjects
            .iter()
            .map(|s| (s.subject_id, s.status.as_str()))
            .collect();

        let mut row = vec![
            student.numerical_order.to_string(),
            student.holy_name.clone().unwrap_or_default(),
            student.full_name.clone(),
            student.email.clone(),
            student.completed.to_string(),
            student.no_complete.to_string(),
            student.absent.to_string(),
        ];
        row.extend(result.subjects.iter().map(|subject| {
            statuses
                .get(&subject.subject_id)
                .map(|s| s.to_string())
                .unwrap_or_default()
        }));
        wtr.write_record(&row)?;
    }

    let data = wtr
        .into_inner()
        .map_err(|e| TrainHubError::serialization(format!("CSV 生成失败: {e}")))?;
    String::from_utf8(data).map_err(|e| TrainHubError::serialization(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::roll_call::entities::{
        RollCallStatus, StudentRollCallSummary, StudentSubjectStatus, SubjectRollCallTally,
    };

    #[test]
    fn test_render_roll_call_csv() {
        let result = RollCallResultResponse {
            season: 3,
            subjects: vec![
                SubjectRollCallTally {
                    subject_id: 10,
                    code: "A01".to_string(),
                    title: "Kinh Thánh".to_string(),
                    completed: 1,
                    ..Default::default()
                },
                SubjectRollCallTally {
                    subject_id: 20,
                    code: "A02".to_string(),
                    title: "Phụng vụ, nhập môn".to_string(),
                    ..Default::default()
                },
            ],
            students: vec![StudentRollCallSummary {
                student_id: 1,
                numerical_order: 5,
                full_name: "Trần An".to_string(),
                holy_name: Some("Maria".to_string()),
                email: "an@example.com".to_string(),
                completed: 1,
                no_complete: 0,
                absent: 0,
                subjects: vec![StudentSubjectStatus {
                    subject_id: 10,
                    status: RollCallStatus::Completed,
                }],
            }],
        };

        let csv = render_roll_call_csv(&result).unwrap();
        let lines: Vec<&str> = csv.lines().collect();
        assert_eq!(
            lines[0],
            "numerical_order,holy_name,full_name,email,completed,no_complete,absent,A01,A02"
        );
        assert_eq!(lines[1], "5,Maria,Trần An,an@example.com,1,0,0,completed,");
        assert_eq!(lines.len(), 2);
    }
}
