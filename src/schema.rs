table! {
    appointments (aid) {
        aid -> Unsigned<Bigint>,
        pid -> Unsigned<Bigint>,
        doctor -> Char,
        clinic_id -> Unsigned<Bigint>,
        start_time -> Datetime,
        completed -> Bool,
        cancelled -> Bool,
        reminder_sent -> Bool,
        notes -> Varchar,
        created_at -> Datetime,
    }
}

table! {
    audit_logs (lid) {
        lid -> Unsigned<Bigint>,
        username -> Char,
        action -> Char,
        entity -> Char,
        entity_id -> Char,
        detail -> Varchar,
        time -> Datetime,
    }
}

table! {
    clinic_hours (clinic_id, weekday) {
        clinic_id -> Unsigned<Bigint>,
        weekday -> Integer,
        open_time -> Nullable<Time>,
        close_time -> Nullable<Time>,
    }
}

table! {
    clinics (clinic_id) {
        clinic_id -> Unsigned<Bigint>,
        clinic_name -> Char,
        address -> Varchar,
        telephone -> Char,
    }
}

table! {
    config (config_key) {
        config_key -> Char,
        config_value -> Varchar,
    }
}

table! {
    consultations (vid) {
        vid -> Unsigned<Bigint>,
        pid -> Unsigned<Bigint>,
        aid -> Nullable<Unsigned<Bigint>>,
        doctor -> Char,
        symptoms -> Varchar,
        diagnosis -> Varchar,
        prescription -> Varchar,
        time -> Datetime,
    }
}

table! {
    login_locks (username) {
        username -> Char,
        failed_attempts -> Integer,
        lock_until -> Nullable<Datetime>,
    }
}

table! {
    patients (pid) {
        pid -> Unsigned<Bigint>,
        name -> Char,
        gender -> Char,
        birthday -> Nullable<Date>,
        telephone -> Char,
        address -> Varchar,
        last_visit -> Nullable<Datetime>,
        created_at -> Datetime,
    }
}

table! {
    sessions (token) {
        token -> Char,
        username -> Char,
        login_time -> Datetime,
        last_active -> Datetime,
    }
}

table! {
    users (username) {
        username -> Char,
        password -> Char,
        name -> Char,
        role -> Char,
        telephone -> Char,
        is_active -> Bool,
        created_at -> Datetime,
    }
}

allow_tables_to_appear_in_same_query!(
    appointments,
    audit_logs,
    clinic_hours,
    clinics,
    config,
    consultations,
    login_locks,
    patients,
    sessions,
    users,
);
