//! Built-in texts for the critical path, used when no locale file loads

type Table = &'static [(&'static str, &'static str)];

const ID: Table = &[
    ("app.title", "Perencana Studi"),
    ("label.semester", "Semester"),
    ("label.credits", "SKS"),
    ("label.max_credits", "Maks SKS"),
    ("label.status", "Status"),
    ("label.unassigned", "Belum dijadwalkan"),
    ("label.progress", "Progres"),
    ("status.under", "Di bawah batas"),
    ("status.exact", "Pas batas"),
    ("status.over", "Melebihi batas"),
    ("msg.saved", "Rencana disimpan"),
    ("msg.course_added", "Mata kuliah {code} ditambahkan"),
    ("msg.course_updated", "Mata kuliah {code} diperbarui"),
    ("msg.course_removed", "Mata kuliah {code} dihapus"),
    ("msg.assigned", "{code} dijadwalkan ke {semester}"),
    ("msg.unassigned", "{code} dikeluarkan dari jadwal"),
    ("msg.automapped", "{count} mata kuliah dijadwalkan ke semester rekomendasi"),
    ("msg.imported", "{count} mata kuliah diimpor"),
    ("msg.exported", "Rencana diekspor ke {path}"),
    ("msg.reset", "Rencana dikembalikan ke data awal"),
    ("msg.cancelled", "Dibatalkan"),
    ("msg.orphaned", "{count} mata kuliah terjadwal di semester yang sudah tidak ada"),
    (
        "confirm.over_limit",
        concat!(
            "Menambahkan {code} ke {semester} melebihi batas {max} SKS ",
            "sebanyak {overage} SKS. Lanjutkan?"
        ),
    ),
    ("confirm.delete", "Hapus mata kuliah {code}?"),
    ("confirm.import", "Ganti {current} mata kuliah dengan {count} mata kuliah dari berkas?"),
    ("confirm.reset", "Hapus semua data dan kembali ke data awal?"),
    ("error.validation", "Data mata kuliah tidak valid: {reason}"),
    ("error.import", "Impor gagal: {reason}"),
    ("error.not_found", "Mata kuliah {id} tidak ditemukan"),
    ("error.unknown_semester", "Semester {id} tidak ada"),
];

const EN: Table = &[
    ("app.title", "Study Planner"),
    ("label.semester", "Semester"),
    ("label.credits", "Credits"),
    ("label.max_credits", "Max credits"),
    ("label.status", "Status"),
    ("label.unassigned", "Unassigned"),
    ("label.progress", "Progress"),
    ("status.under", "Under limit"),
    ("status.exact", "At limit"),
    ("status.over", "Over limit"),
    ("msg.saved", "Plan saved"),
    ("msg.course_added", "Course {code} added"),
    ("msg.course_updated", "Course {code} updated"),
    ("msg.course_removed", "Course {code} removed"),
    ("msg.assigned", "{code} assigned to {semester}"),
    ("msg.unassigned", "{code} unassigned"),
    ("msg.automapped", "{count} courses placed in their recommended semester"),
    ("msg.imported", "{count} courses imported"),
    ("msg.exported", "Plan exported to {path}"),
    ("msg.reset", "Plan reset to the initial data"),
    ("msg.cancelled", "Cancelled"),
    ("msg.orphaned", "{count} courses are assigned to semesters that no longer exist"),
    (
        "confirm.over_limit",
        "Adding {code} to {semester} exceeds the {max}-credit limit by {overage}. Continue?",
    ),
    ("confirm.delete", "Delete course {code}?"),
    ("confirm.import", "Replace {current} courses with {count} courses from the file?"),
    ("confirm.reset", "Erase all data and return to the initial plan?"),
    ("error.validation", "Invalid course: {reason}"),
    ("error.import", "Import failed: {reason}"),
    ("error.not_found", "Course {id} not found"),
    ("error.unknown_semester", "Semester {id} does not exist"),
];

const MS: Table = &[
    ("app.title", "Perancang Pengajian"),
    ("label.credits", "Kredit"),
    ("label.max_credits", "Had kredit"),
    ("label.unassigned", "Belum ditetapkan"),
    ("label.progress", "Kemajuan"),
    ("status.under", "Bawah had"),
    ("status.exact", "Tepat pada had"),
    ("status.over", "Melebihi had"),
    ("msg.saved", "Pelan disimpan"),
    ("msg.course_added", "Kursus {code} ditambah"),
    ("msg.course_removed", "Kursus {code} dipadam"),
    ("msg.assigned", "{code} ditetapkan ke {semester}"),
    ("msg.automapped", "{count} kursus ditetapkan ke semester yang disyorkan"),
    ("msg.imported", "{count} kursus diimport"),
    ("msg.cancelled", "Dibatalkan"),
    (
        "confirm.over_limit",
        "Menambah {code} ke {semester} melebihi had {max} kredit sebanyak {overage}. Teruskan?",
    ),
    ("confirm.delete", "Padam kursus {code}?"),
    ("confirm.reset", "Padam semua data dan kembali ke pelan asal?"),
    ("error.import", "Import gagal: {reason}"),
];

fn table(lang: &str) -> Table {
    match lang {
        "en" => EN,
        "ms" => MS,
        _ => ID,
    }
}

/// Built-in text for `key` in `lang`, if that table has it
pub(super) fn lookup(lang: &str, key: &str) -> Option<&'static str> {
    table(lang)
        .iter()
        .find(|(k, _)| *k == key)
        .map(|(_, v)| *v)
}
