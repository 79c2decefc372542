//! Canned program output, trimmed to the lines the classifier looks at.

/// Gaussian 16 SCF that converged on the first try.
pub const G16_SCF_CONVERGED: &str = "\
 Requested convergence on RMS density matrix=1.00D-08 within 128 cycles.
 SCF Done:  E(RHF) =  -74.9620207285     A.U. after    9 cycles
            NFock=  9  Conv=0.26D-08     -V/T= 2.0056
 Normal termination of Gaussian 16 at Tue Mar  3 10:12:01 2026.
";

/// Gaussian 16 SCF that ran out of cycles.
pub const G16_SCF_FAILED: &str = "\
 Requested convergence on RMS density matrix=1.00D-08 within 10 cycles.
 >>>>>>>>>> Convergence criterion not met.
 SCF Done:  E(RHF) =  -74.8803451102     A.U. after   11 cycles
            NFock= 10  Conv=0.13D-03     -V/T= 2.0051
 Convergence failure -- run terminated.
 Error termination via Lnk1e in /opt/g16/l502.exe at Tue Mar  3 10:12:01 2026.
";

/// Gaussian 16 SCF that printed a transient failure and then converged.
pub const G16_SCF_RESCUED: &str = "\
 >>>>>>>>>> Convergence criterion not met.
 SCF Done:  E(RHF) =  -74.9611003120     A.U. after   65 cycles
 Rotation gradient small -- convergence achieved.
 SCF Done:  E(RHF) =  -74.9620207285     A.U. after   70 cycles
 Normal termination of Gaussian 16 at Tue Mar  3 10:12:01 2026.
";

/// Gaussian 16 optimization that hit the step limit.
pub const G16_OPT_FAILED: &str = "\
 SCF Done:  E(RHF) =  -74.9620207285     A.U. after    9 cycles
 Optimization stopped.
    -- Number of steps exceeded,  NStep=  20
    -- Flag reset to prevent archiving.
 Error termination via Lnk1e in /opt/g16/l9999.exe at Tue Mar  3 10:12:01 2026.
";

/// Gaussian 16 optimization that reached a stationary point.
pub const G16_OPT_CONVERGED: &str = "\
 SCF Done:  E(RHF) =  -74.9659011923     A.U. after    7 cycles
 Optimization completed.
    -- Stationary point found.
 Normal termination of Gaussian 16 at Tue Mar  3 10:12:01 2026.
";

/// Gaussian 16 output where both SCF and optimization failed.
pub const G16_SCF_AND_OPT_FAILED: &str = "\
 >>>>>>>>>> Convergence criterion not met.
 SCF Done:  E(RHF) =  -74.8803451102     A.U. after   11 cycles
 Optimization stopped.
    -- Number of steps exceeded,  NStep=  20
 Error termination via Lnk1e in /opt/g16/l9999.exe at Tue Mar  3 10:12:01 2026.
";

/// Gaussian 16 output cut off before any marker (killed by the queue).
pub const G16_TRUNCATED: &str = "\
 Entering Gaussian System, Link 0=g16
 Requested convergence on RMS density matrix=1.00D-08 within 128 cycles.
";

/// Psi4 SCF that converged.
pub const PSI4_SCF_CONVERGED: &str = "\
  @DF-RHF Final Energy:   -76.02663273509
  Energy and wave function converged.
    Total Energy =                        -76.0266327350902165
*** Psi4 exiting successfully. Buy a developer a beer!
";

/// ORCA 4 single point.
pub const ORCA4_SCF_CONVERGED: &str = "\
                     *****************************************************
                     *                     SUCCESS                       *
                     *           SCF CONVERGED AFTER  12 CYCLES          *
                     *****************************************************
FINAL SINGLE POINT ENERGY       -76.026632734965
                             ****ORCA TERMINATED NORMALLY****
";

/// Psi4 SCF that ran out of iterations.
pub const PSI4_SCF_FAILED: &str = "\
   @DF-RHF iter  50:   -75.98201174398848   -1.02381e-05   3.41725e-04 DIIS
PsiException: Could not converge SCF iterations in 50 iterations.
";

/// ORCA 4 SCF that ran out of cycles.
pub const ORCA4_SCF_FAILED: &str = "\
                     *****************************************************
                     *                      ERROR                        *
                     *           SCF NOT CONVERGED AFTER 125 CYCLES      *
                     *****************************************************
";

/// Molpro 2015 RHF that did not converge; the occupancy summary still follows.
pub const MOLPRO_SCF_FAILED: &str = "\
 ?No convergence in max. number of iterations
 Final occupancy:   3   1   1   0
 !RHF STATE 1.1 Energy                -75.961124523711
 Variable memory released
";

/// NWChem 6 SCF that did not converge; the energy summary still follows.
pub const NWCHEM6_SCF_FAILED: &str = "\
 Calculation failed to converge
         Total SCF energy =    -75.961124523711
 Total times  cpu:        1.2s     wall:        1.5s
";
