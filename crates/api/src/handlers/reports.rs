// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::{ApiError, translate_ledger_error};
use crate::input_policy::{parse_integer, require_param};
use crate::request_response::{
    FloorRoomCountResponse, QuarterlyReportQuery, QuarterlyReportResponse,
    RoomClientCountResponse, RoomIncomeResponse,
};
use hotel_ledger::StayLedger;
use hotel_ledger_domain::{Period, QuarterlyReport, format_date};
use hotel_ledger_persistence::Persistence;
use tracing::debug;

/// Occupancy and income for a calendar quarter.
///
/// Both `quarter` and `year` are required.
///
/// # Errors
///
/// Returns `InvalidInput` for a missing or non-numeric parameter,
/// `InvalidQuarter` outside 1..=4, `InvalidYear` for an unsupported year,
/// or a query error.
pub fn quarterly_report(
    persistence: &mut Persistence,
    query: &QuarterlyReportQuery,
) -> Result<QuarterlyReportResponse, ApiError> {
    let quarter: i64 = parse_integer("quarter", require_param("quarter", query.quarter.as_deref())?)?;
    let year: i64 = parse_integer("year", require_param("year", query.year.as_deref())?)?;

    let report: QuarterlyReport = StayLedger::new(persistence)
        .quarterly_report(year, quarter)
        .map_err(translate_ledger_error)?;
    debug!(year, quarter, total_income = %report.total_income, "Built quarterly report");

    let period: Period = report.quarter.period();
    Ok(QuarterlyReportResponse {
        year: report.quarter.year(),
        quarter: report.quarter.number(),
        start: format_date(period.start()),
        end: format_date(period.end()),
        clients_per_room: report
            .clients_per_room
            .iter()
            .map(|entry| RoomClientCountResponse {
                room_id: entry.room_id,
                room_number: entry.room_number,
                client_count: entry.client_count,
            })
            .collect(),
        rooms_per_floor: report
            .rooms_per_floor
            .iter()
            .map(|entry| FloorRoomCountResponse {
                floor: entry.floor,
                room_count: entry.room_count,
            })
            .collect(),
        income_per_room: report
            .income_per_room
            .iter()
            .map(|entry| RoomIncomeResponse {
                room_id: entry.room_id,
                room_number: entry.room_number,
                total_income: entry.total_income,
            })
            .collect(),
        total_income: report.total_income,
    })
}
