// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use std::collections::HashSet;

use innkeep_domain::{
    ClientProfile, Document, DocumentType, MAX_ROOMS_PER_CLIENT, PaymentType, RoomState,
    validate_client_profile, validate_document,
};
use innkeep_persistence::{
    ClientDetail, ClientFilter, ClientRecord, DocumentCheck, DocumentStatus, OccupancyRecord,
    Persistence, ReleaseOutcome, RemovalOutcome, RoomRecord,
};
use innkeep_reports::{ClientStatistics, ReportInputs, ReportPeriod};
use time::{Date, OffsetDateTime};
use tracing::{debug, info};

use super::{clean_text, parse_choice, parse_day, parse_optional_choice, parse_timestamp};
use crate::error::{
    ApiError, FieldViolation, translate_persistence_error, translate_report_error,
};
use crate::request_response::{
    AddRoomsRequest, CheckDocumentRequest, CheckDocumentResponse, ClientDetailResponse,
    ClientHistoryResponse, ClientListQuery, ClientListResponse, ClientResponse,
    ClientRoomsResponse, ClientsInRangeResponse, ClientsOnDateResponse, CreateClientRequest,
    DateQuery, DateRangeQuery, FreedRoomResponse, OccupancyResponse, ReleaseResponse,
    RemovalResponse, UpdateClientRequest,
};
use crate::settings::HotelSettings;

fn detail_response(detail: &ClientDetail) -> ClientDetailResponse {
    ClientDetailResponse {
        client: ClientResponse::from(&detail.client),
        active_rooms: detail.active_rooms.iter().map(OccupancyResponse::from).collect(),
        history: detail.history.iter().map(OccupancyResponse::from).collect(),
    }
}

fn load_client(persistence: &mut Persistence, client_id: i64) -> Result<ClientRecord, ApiError> {
    persistence
        .get_client(client_id)
        .map_err(translate_persistence_error)?
        .ok_or_else(|| ApiError::ResourceNotFound {
            resource_type: String::from("Client"),
            message: format!("Client {client_id} does not exist"),
        })
}

/// Runs the profile rules after parsing, then the active-document rule.
///
/// Rules whose inputs failed to parse are skipped so each field is reported once.
fn validate_profile(
    persistence: &mut Persistence,
    profile: &ClientProfile,
    owner: Option<i64>,
    mut violations: Vec<FieldViolation>,
) -> Result<(), ApiError> {
    let unparsed = |field: &str| violations.iter().any(|v| v.field == field);
    let skip_document: bool = unparsed("document_type");
    let skip_dates: bool = unparsed("check_in") || unparsed("planned_checkout");

    let rule_violations: Vec<FieldViolation> = validate_client_profile(profile)
        .iter()
        .filter(|err| match err.field() {
            "document_number" => !skip_document,
            "planned_checkout" => !skip_dates,
            _ => true,
        })
        .map(FieldViolation::from)
        .collect();
    violations.extend(rule_violations);

    let document_rejected: bool = violations
        .iter()
        .any(|v| v.field == "document_type" || v.field == "document_number");
    let holder: Option<i64> = if document_rejected {
        None
    } else {
        persistence
            .active_document_holder(&profile.document, owner)
            .map_err(translate_persistence_error)?
    };
    if let Some(client_id) = holder {
        violations.push(FieldViolation::new(
            "document_number",
            format!(
                "{} is held by client {client_id}, who still has active rooms",
                profile.document
            ),
        ));
    }

    ApiError::check(violations)
}

/// Checks a room selection: non-empty, no repeats, every room free, and the
/// client's total within the per-client cap.
fn validate_room_selection(
    persistence: &mut Persistence,
    room_ids: &[i64],
    already_held: usize,
    violations: &mut Vec<FieldViolation>,
) -> Result<(), ApiError> {
    if room_ids.is_empty() {
        violations.push(FieldViolation::new("rooms", "Select at least one room"));
        return Ok(());
    }

    let mut seen: HashSet<i64> = HashSet::with_capacity(room_ids.len());
    for room_id in room_ids {
        if !seen.insert(*room_id) {
            violations.push(FieldViolation::new(
                "rooms",
                format!("Room {room_id} is selected more than once"),
            ));
            continue;
        }
        let room: Option<RoomRecord> = persistence
            .get_room(*room_id)
            .map_err(translate_persistence_error)?;
        match room {
            None => violations.push(FieldViolation::new(
                "rooms",
                format!("Room {room_id} does not exist"),
            )),
            Some(record) if record.room.state != RoomState::Available => {
                violations.push(FieldViolation::new(
                    "rooms",
                    format!(
                        "Room {} is not available (currently {})",
                        record.room.number, record.room.state
                    ),
                ));
            }
            Some(_) => {}
        }
    }

    let total: usize = already_held + room_ids.len();
    if total > MAX_ROOMS_PER_CLIENT {
        violations.push(FieldViolation::new(
            "rooms",
            format!("A client may hold at most {MAX_ROOMS_PER_CLIENT} rooms; this request would give {total}"),
        ));
    }
    Ok(())
}

/// Registers a client and assigns the selected rooms in one transaction.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` listing every rejected field, or the
/// translated persistence error if the write fails.
pub fn create_client(
    persistence: &mut Persistence,
    request: &CreateClientRequest,
    now: OffsetDateTime,
) -> Result<ClientDetailResponse, ApiError> {
    let mut violations: Vec<FieldViolation> = Vec::new();
    let document_type: Option<DocumentType> =
        parse_choice(&request.document_type, &mut violations);
    let payment_type: Option<PaymentType> = parse_choice(&request.payment_type, &mut violations);
    let check_in: Option<Option<OffsetDateTime>> =
        parse_timestamp("check_in", request.check_in.as_deref(), &mut violations);
    let planned_checkout: Option<Option<OffsetDateTime>> = parse_timestamp(
        "planned_checkout",
        request.planned_checkout.as_deref(),
        &mut violations,
    );

    let profile: ClientProfile = ClientProfile {
        first_names: request.first_names.trim().to_string(),
        last_names: request.last_names.trim().to_string(),
        document: Document::new(
            document_type.unwrap_or(DocumentType::NationalId),
            &request.document_number,
        ),
        desired_rooms: request.desired_rooms,
        payment_type: payment_type.unwrap_or(PaymentType::Cash),
        amount_paid: request.amount_paid,
        age: request.age,
        phone: clean_text(request.phone.as_deref()),
        address: clean_text(request.address.as_deref()),
        check_in: Some(check_in.flatten().unwrap_or(now)),
        planned_checkout: planned_checkout.flatten(),
    };

    validate_room_selection(persistence, &request.rooms, 0, &mut violations)?;
    let selected: i64 = i64::try_from(request.rooms.len()).unwrap_or(i64::MAX);
    if !request.rooms.is_empty() && selected != request.desired_rooms {
        violations.push(FieldViolation::new(
            "rooms",
            format!(
                "Selected {selected} rooms but desired_rooms is {}",
                request.desired_rooms
            ),
        ));
    }
    validate_profile(persistence, &profile, None, violations)?;

    let detail: ClientDetail = persistence
        .register_client(&profile, &request.rooms, now)
        .map_err(translate_persistence_error)?;
    Ok(detail_response(&detail))
}

/// Retrieves a client with active rooms and full ledger history.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the client does not exist.
pub fn get_client(
    persistence: &mut Persistence,
    client_id: i64,
) -> Result<ClientDetailResponse, ApiError> {
    let detail: ClientDetail = persistence
        .client_detail(client_id)
        .map_err(translate_persistence_error)?;
    Ok(detail_response(&detail))
}

/// Changes the fields present in the request and revalidates the result.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown client or
/// `ApiError::ValidationFailed` listing every rejected field.
pub fn update_client(
    persistence: &mut Persistence,
    client_id: i64,
    request: &UpdateClientRequest,
    now: OffsetDateTime,
) -> Result<ClientResponse, ApiError> {
    let current: ClientRecord = load_client(persistence, client_id)?;
    let mut violations: Vec<FieldViolation> = Vec::new();
    let mut profile: ClientProfile = current.profile.clone();

    if let Some(first_names) = &request.first_names {
        profile.first_names = first_names.trim().to_string();
    }
    if let Some(last_names) = &request.last_names {
        profile.last_names = last_names.trim().to_string();
    }
    if request.document_type.is_some() || request.document_number.is_some() {
        let document_type: DocumentType = match request.document_type.as_deref() {
            Some(value) => parse_choice(value, &mut violations)
                .unwrap_or(current.profile.document.document_type),
            None => current.profile.document.document_type,
        };
        let number: &str = request
            .document_number
            .as_deref()
            .unwrap_or(&current.profile.document.number);
        profile.document = Document::new(document_type, number);
    }
    if let Some(desired_rooms) = request.desired_rooms {
        profile.desired_rooms = desired_rooms;
    }
    if let Some(payment_type) = request
        .payment_type
        .as_deref()
        .and_then(|value| parse_choice(value, &mut violations))
    {
        profile.payment_type = payment_type;
    }
    if let Some(amount_paid) = request.amount_paid {
        profile.amount_paid = amount_paid;
    }
    if request.age.is_some() {
        profile.age = request.age;
    }
    if let Some(phone) = &request.phone {
        profile.phone = clean_text(Some(phone));
    }
    if let Some(address) = &request.address {
        profile.address = clean_text(Some(address));
    }
    if let Some(check_in) = request
        .check_in
        .as_deref()
        .and_then(|raw| parse_timestamp("check_in", Some(raw), &mut violations))
    {
        profile.check_in = check_in;
    }
    if let Some(planned_checkout) = request
        .planned_checkout
        .as_deref()
        .and_then(|raw| parse_timestamp("planned_checkout", Some(raw), &mut violations))
    {
        profile.planned_checkout = planned_checkout;
    }

    validate_profile(persistence, &profile, Some(client_id), violations)?;

    let record: ClientRecord = persistence
        .update_client(client_id, &profile, now)
        .map_err(translate_persistence_error)?;
    Ok(ClientResponse::from(&record))
}

/// Releases a client's rooms and deletes the client with its history.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the client does not exist.
pub fn delete_client(
    persistence: &mut Persistence,
    client_id: i64,
    now: OffsetDateTime,
) -> Result<RemovalResponse, ApiError> {
    let outcome: RemovalOutcome = persistence
        .remove_client(client_id, now)
        .map_err(translate_persistence_error)?;
    Ok(RemovalResponse {
        client_id,
        freed: outcome.freed.iter().map(FreedRoomResponse::from).collect(),
        message: format!(
            "Client {client_id} deleted; {} rooms released",
            outcome.freed.len()
        ),
    })
}

/// Lists clients matching the query filters, newest registration first.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` for malformed filter values.
pub fn list_clients(
    persistence: &mut Persistence,
    query: &ClientListQuery,
    settings: &HotelSettings,
) -> Result<ClientListResponse, ApiError> {
    let mut violations: Vec<FieldViolation> = Vec::new();
    let filter: ClientFilter = ClientFilter {
        document_type: parse_optional_choice(query.document_type.as_deref(), &mut violations),
        payment_type: parse_optional_choice(query.payment_type.as_deref(), &mut violations),
        active: query.active,
        has_rooms: query.has_rooms,
        check_in_from: parse_day("check_in_from", query.check_in_from.as_deref(), &mut violations),
        check_in_to: parse_day("check_in_to", query.check_in_to.as_deref(), &mut violations),
        checkout_from: parse_day("checkout_from", query.checkout_from.as_deref(), &mut violations),
        checkout_to: parse_day("checkout_to", query.checkout_to.as_deref(), &mut violations),
        on_date: parse_day("on_date", query.on_date.as_deref(), &mut violations),
        min_age: query.min_age,
        max_age: query.max_age,
        min_amount: query.min_amount,
        max_amount: query.max_amount,
        search: clean_text(query.search.as_deref()),
    };
    ApiError::check(violations)?;

    let clients: Vec<ClientRecord> = persistence
        .list_clients(&filter, &settings.calendar)
        .map_err(translate_persistence_error)?;
    debug!(count = clients.len(), "Listed clients");
    Ok(ClientListResponse::new(&clients))
}

/// Lists clients currently holding rooms.
///
/// # Errors
///
/// Returns an error if the clients cannot be loaded.
pub fn active_clients(
    persistence: &mut Persistence,
    settings: &HotelSettings,
) -> Result<ClientListResponse, ApiError> {
    let filter: ClientFilter = ClientFilter {
        active: Some(true),
        ..ClientFilter::default()
    };
    let clients: Vec<ClientRecord> = persistence
        .list_clients(&filter, &settings.calendar)
        .map_err(translate_persistence_error)?;
    Ok(ClientListResponse::new(&clients))
}

/// Splits every client into those holding rooms and those who left.
///
/// # Errors
///
/// Returns an error if the clients cannot be loaded.
pub fn client_history(
    persistence: &mut Persistence,
    settings: &HotelSettings,
) -> Result<ClientHistoryResponse, ApiError> {
    let clients: Vec<ClientRecord> = persistence
        .list_clients(&ClientFilter::default(), &settings.calendar)
        .map_err(translate_persistence_error)?;
    let (active, inactive): (Vec<&ClientRecord>, Vec<&ClientRecord>) =
        clients.iter().partition(|c| c.is_active());
    Ok(ClientHistoryResponse {
        active: ClientListResponse::new(active),
        inactive: ClientListResponse::new(inactive),
    })
}

/// Registry-wide client figures.
///
/// # Errors
///
/// Returns an error if the registry cannot be loaded.
pub fn client_statistics(persistence: &mut Persistence) -> Result<ClientStatistics, ApiError> {
    let inputs: ReportInputs = persistence
        .load_report_inputs()
        .map_err(translate_persistence_error)?;
    Ok(innkeep_reports::client_statistics(&inputs.clients))
}

/// Lists clients in the hotel on a day, today when none is given.
///
/// # Errors
///
/// Returns an error for a malformed date.
pub fn clients_on_date(
    persistence: &mut Persistence,
    query: &DateQuery,
    settings: &HotelSettings,
    now: OffsetDateTime,
) -> Result<ClientsOnDateResponse, ApiError> {
    let mut violations: Vec<FieldViolation> = Vec::new();
    let day: Option<Date> = parse_day("date", query.date.as_deref(), &mut violations);
    ApiError::check(violations)?;
    let day: Date = day.unwrap_or_else(|| settings.today(now));

    let filter: ClientFilter = ClientFilter {
        on_date: Some(day),
        ..ClientFilter::default()
    };
    let clients: Vec<ClientRecord> = persistence
        .list_clients(&filter, &settings.calendar)
        .map_err(translate_persistence_error)?;
    let listing: ClientListResponse = ClientListResponse::new(&clients);
    Ok(ClientsOnDateResponse {
        date: day,
        count: listing.count,
        clients: listing.clients,
    })
}

/// Lists clients whose stay overlaps a date range.
///
/// The range defaults like report periods: the last thirty days up to today.
///
/// # Errors
///
/// Returns an error for malformed dates or a backwards range.
pub fn clients_in_range(
    persistence: &mut Persistence,
    query: &DateRangeQuery,
    settings: &HotelSettings,
    now: OffsetDateTime,
) -> Result<ClientsInRangeResponse, ApiError> {
    let period: ReportPeriod = ReportPeriod::resolve(
        query.start_date.as_deref(),
        query.end_date.as_deref(),
        settings.today(now),
    )
    .map_err(translate_report_error)?;

    let clients: Vec<ClientRecord> = persistence
        .list_clients(&ClientFilter::default(), &settings.calendar)
        .map_err(translate_persistence_error)?;
    let listing: ClientListResponse = ClientListResponse::new(
        clients
            .iter()
            .filter(|c| c.stayed_between(period.start, period.end, &settings.calendar)),
    );
    Ok(ClientsInRangeResponse {
        start_date: period.start,
        end_date: period.end,
        count: listing.count,
        clients: listing.clients,
    })
}

/// Answers whether a document may register a new stay, and why.
///
/// # Errors
///
/// Returns `ApiError::ValidationFailed` for a malformed document.
pub fn check_document(
    persistence: &mut Persistence,
    request: &CheckDocumentRequest,
) -> Result<CheckDocumentResponse, ApiError> {
    let mut violations: Vec<FieldViolation> = Vec::new();
    let document_type: Option<DocumentType> =
        parse_choice(&request.document_type, &mut violations);
    ApiError::check(violations)?;

    let document: Document = Document::new(
        document_type.unwrap_or(DocumentType::NationalId),
        &request.document_number,
    );
    if let Err(err) = validate_document(&document) {
        return Err(ApiError::ValidationFailed {
            violations: vec![FieldViolation::from(&err)],
        });
    }

    let check: DocumentCheck = persistence
        .check_document(&document)
        .map_err(translate_persistence_error)?;
    let message: String = match (check.status, &check.existing) {
        (DocumentStatus::ActiveClient, Some(existing)) => format!(
            "Client {} with this document still holds rooms",
            existing.client_id
        ),
        (DocumentStatus::PreviousStayClosed, _) => format!(
            "{} previous stays found, all closed; the document may register again",
            check.previous_stays
        ),
        _ => String::from("No client has registered with this document"),
    };

    Ok(CheckDocumentResponse {
        available: check.status.is_available(),
        reason: check.status.as_str().to_string(),
        message,
        previous_stays: check.previous_stays,
        existing_client: check.existing.as_ref().map(ClientResponse::from),
    })
}

/// Lists a client's ledger entries, newest first.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the client does not exist.
pub fn client_rooms(
    persistence: &mut Persistence,
    client_id: i64,
) -> Result<ClientRoomsResponse, ApiError> {
    let entries: Vec<OccupancyRecord> = persistence
        .client_entries(client_id)
        .map_err(translate_persistence_error)?;
    Ok(ClientRoomsResponse {
        client_id,
        count: entries.len(),
        entries: entries.iter().map(OccupancyResponse::from).collect(),
    })
}

/// Assigns more rooms to an existing client.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` for an unknown client, or
/// `ApiError::ValidationFailed` if any room cannot be assigned.
pub fn add_rooms(
    persistence: &mut Persistence,
    client_id: i64,
    request: &AddRoomsRequest,
    now: OffsetDateTime,
) -> Result<ClientDetailResponse, ApiError> {
    let current: ClientRecord = load_client(persistence, client_id)?;
    let mut violations: Vec<FieldViolation> = Vec::new();
    validate_room_selection(persistence, &request.rooms, current.active_rooms, &mut violations)?;
    ApiError::check(violations)?;

    let detail: ClientDetail = persistence
        .add_rooms(client_id, &request.rooms, now)
        .map_err(translate_persistence_error)?;
    info!(client_id, added = request.rooms.len(), "Added rooms to client");
    Ok(detail_response(&detail))
}

/// Releases every room a client holds.
///
/// Releasing a client with nothing to release succeeds with a warning.
///
/// # Errors
///
/// Returns `ApiError::ResourceNotFound` if the client does not exist.
pub fn release_client(
    persistence: &mut Persistence,
    client_id: i64,
    now: OffsetDateTime,
) -> Result<ReleaseResponse, ApiError> {
    let outcome: ReleaseOutcome = persistence
        .release_client(client_id, now)
        .map_err(translate_persistence_error)?;
    let message: String = outcome.warning.clone().unwrap_or_else(|| {
        format!(
            "Released {} rooms for client {client_id}",
            outcome.released.len()
        )
    });
    Ok(ReleaseResponse {
        client_id,
        released: outcome.released.iter().map(FreedRoomResponse::from).collect(),
        actual_checkout: outcome.actual_checkout,
        warning: outcome.warning,
        message,
    })
}
