/*!
 * Composite ML-KEM algorithm registry
 *
 * The fixed catalog of composite parameter sets. Each entry pairs an ML-KEM
 * parameter set with a NIST curve, a domain-separation label and an OID, as
 * listed in the IETF LAMPS composite KEM draft. Only the ECDH/NIST subset is
 * provided here.
 */

mod algorithm;

pub use algorithm::*;
